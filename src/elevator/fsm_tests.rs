/*
 * Unit tests for elevator module
 *
 * The unit tests follows the Arrange, Act, Assert pattern. The state machine
 * is driven by hand with a virtual clock, no timers are involved.
 *
 * Tests:
 *  - test_fsm_init
 *  - test_fsm_assign_sets_pickup_and_moves
 *  - test_fsm_full_delivery_cycle
 *  - test_fsm_dwell_waits_for_deadline
 *  - test_fsm_park_from_idle
 *  - test_fsm_park_when_already_at_ground
 *  - test_fsm_ignores_invalid_events
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod fsm_tests {
    use crate::elevator::{ElevatorFSM, Event, Outcome, Phase};
    use crate::shared::Behaviour::{Idle, Moving};
    use crate::shared::{Passenger, VirtualClock};

    const DWELL_MS: u64 = 2000;
    const FRAME_MS: u64 = 16;

    fn setup_fsm() -> (ElevatorFSM, VirtualClock) {
        (ElevatorFSM::new(0, DWELL_MS), VirtualClock::new(FRAME_MS))
    }

    // Advances the elevator until its current move ends, returning the outcome
    // of the arrival.
    fn drive_move(fsm: &mut ElevatorFSM, clock: &mut VirtualClock) -> Outcome {
        for _ in 0..10_000 {
            clock.advance();
            fsm.advance();
            if fsm.is_moving() {
                let outcome = fsm.check_arrival(clock.now());
                if !fsm.is_moving() {
                    return outcome;
                }
            }
        }
        panic!("Move did not finish");
    }

    // Advances the clock until the running dwell ends.
    fn drive_dwell(fsm: &mut ElevatorFSM, clock: &mut VirtualClock) -> Outcome {
        let until = fsm.dwell_until().expect("Elevator is not dwelling");
        loop {
            clock.advance();
            let outcome = fsm.check_dwell(clock.now());
            if clock.now() >= until {
                return outcome;
            }
            assert_eq!(outcome, Outcome::Continue);
        }
    }

    #[test]
    fn test_fsm_init() {
        // Purpose: Verify that the FSM is in the expected initial state after creation

        // Arrange
        let (fsm, _clock) = setup_fsm();

        // Assert
        let snapshot = fsm.snapshot();
        assert_eq!(fsm.phase(), Phase::Idle);
        assert_eq!(snapshot.behaviour, Idle);
        assert_eq!(snapshot.position, 0.0);
        assert_eq!(snapshot.target_floor, 0);
        assert_eq!(snapshot.pickup_floor, None);
        assert!(fsm.is_parked());
    }

    #[test]
    fn test_fsm_assign_sets_pickup_and_moves() {
        // Arrange
        let (mut fsm, clock) = setup_fsm();
        let passenger = Passenger::new(3, 5);

        // Act
        let outcome = fsm.handle_event(Event::Assigned(passenger), clock.now());

        // Assert
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(fsm.phase(), Phase::MovingToPickup(passenger));
        assert_eq!(fsm.pickup_floor(), Some(3));
        assert_eq!(fsm.target_floor(), 2);
        assert_eq!(fsm.behaviour(), Moving);
        assert!(!fsm.is_idle());
    }

    #[test]
    fn test_fsm_full_delivery_cycle() {
        // Purpose: pickup at floor 3 (position 2), dwell, dropoff at floor 5
        // (position 4), dwell, then the elevator asks for a new dispatch

        // Arrange
        let (mut fsm, mut clock) = setup_fsm();
        let passenger = Passenger::new(3, 5);
        fsm.handle_event(Event::Assigned(passenger), clock.now());

        // Act & Assert: pickup
        assert_eq!(drive_move(&mut fsm, &mut clock), Outcome::Continue);
        assert_eq!(fsm.position(), 2.0);
        assert_eq!(fsm.pickup_floor(), None);
        assert!(fsm.is_idle());
        assert!(matches!(fsm.phase(), Phase::Boarding { .. }));

        // Act & Assert: boarding dwell starts the dropoff move
        assert_eq!(drive_dwell(&mut fsm, &mut clock), Outcome::Continue);
        assert_eq!(fsm.phase(), Phase::MovingToDropoff(passenger));
        assert_eq!(fsm.target_floor(), 4);

        // Act & Assert: dropoff
        assert_eq!(drive_move(&mut fsm, &mut clock), Outcome::Continue);
        assert_eq!(fsm.position(), 4.0);
        assert!(matches!(fsm.phase(), Phase::Alighting { .. }));

        // Act & Assert: alighting dwell ends in a delivery
        assert_eq!(drive_dwell(&mut fsm, &mut clock), Outcome::Delivered);
        assert_eq!(fsm.phase(), Phase::Idle);
    }

    #[test]
    fn test_fsm_dwell_waits_for_deadline() {
        // Arrange
        let (mut fsm, mut clock) = setup_fsm();
        fsm.handle_event(Event::Assigned(Passenger::new(1, 2)), clock.now());
        drive_move(&mut fsm, &mut clock);
        let arrived_at = clock.now();

        // Act
        let early = fsm.check_dwell(arrived_at.after_millis(DWELL_MS - 1));
        assert!(matches!(fsm.phase(), Phase::Boarding { .. }));
        assert_eq!(fsm.dwell_until(), Some(arrived_at.after_millis(DWELL_MS)));
        let on_time = fsm.check_dwell(arrived_at.after_millis(DWELL_MS));

        // Assert
        assert_eq!(fsm.dwell_until(), None);
        assert_eq!(early, Outcome::Continue);
        assert_eq!(on_time, Outcome::Continue);
        assert_eq!(fsm.phase(), Phase::MovingToDropoff(Passenger::new(1, 2)));
    }

    #[test]
    fn test_fsm_park_from_idle() {
        // Arrange
        let (mut fsm, mut clock) = setup_fsm();
        fsm.handle_event(Event::Assigned(Passenger::new(4, 6)), clock.now());
        drive_move(&mut fsm, &mut clock);
        drive_dwell(&mut fsm, &mut clock);
        drive_move(&mut fsm, &mut clock);
        drive_dwell(&mut fsm, &mut clock);

        // Act
        fsm.handle_event(Event::Park, clock.now());
        assert_eq!(fsm.phase(), Phase::Parking);
        let outcome = drive_move(&mut fsm, &mut clock);

        // Assert
        assert_eq!(outcome, Outcome::Parked);
        assert_eq!(fsm.position(), 0.0);
        assert_eq!(fsm.pickup_floor(), None);
        assert!(fsm.is_parked());
    }

    #[test]
    fn test_fsm_park_when_already_at_ground() {
        // Arrange
        let (mut fsm, mut clock) = setup_fsm();

        // Act
        fsm.handle_event(Event::Park, clock.now());
        let outcome = drive_move(&mut fsm, &mut clock);

        // Assert
        assert_eq!(outcome, Outcome::Parked);
        assert_eq!(clock.ticks(), 1);
    }

    #[test]
    fn test_fsm_ignores_invalid_events() {
        // Arrange
        let (mut fsm, clock) = setup_fsm();
        let passenger = Passenger::new(2, 3);
        fsm.handle_event(Event::Assigned(passenger), clock.now());

        // Act
        let reassigned = fsm.handle_event(Event::Assigned(Passenger::new(5, 1)), clock.now());
        let dwell = fsm.handle_event(Event::DwellElapsed, clock.now());

        // Assert
        assert_eq!(reassigned, Outcome::Continue);
        assert_eq!(dwell, Outcome::Continue);
        assert_eq!(fsm.phase(), Phase::MovingToPickup(passenger));
        assert_eq!(fsm.pickup_floor(), Some(2));
    }
}
