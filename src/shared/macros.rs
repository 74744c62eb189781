/***************************************/
/*               Macros                */
/***************************************/

/// Unwraps a startup `Result`, logging the error and exiting with status 1.
#[macro_export]
macro_rules! unwrap_or_exit {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => {
                log::error!("Startup failed: {}", e);
                std::process::exit(1);
            }
        }
    };
}
