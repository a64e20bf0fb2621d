#[cfg(test)]
mod tests {
    use crate::calendar::{CivilDate, NowTime};
    use crate::location::Location;
    use crate::offset::HourOffset;
    use crate::sleeper::Sleeper;
    use crate::sunriset::DayType;
    use crate::target::*;
    use crate::twilight::TwilightAltitude;
    use std::time::Duration;

    const EPS: f64 = 1e-9;

    #[derive(Default)]
    struct RecordingSleeper {
        calls: Vec<Duration>,
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&mut self, duration: Duration) {
            self.calls.push(duration);
        }

        fn name(&self) -> &str {
            "Recording"
        }
    }

    fn midsummer() -> CivilDate {
        CivilDate::new(2013, 6, 21)
    }

    fn greenwich_at(hours: f64) -> Target {
        Target::new(
            Location::new(51.477932, 0.0),
            midsummer(),
            TwilightAltitude::Daylight,
            HourOffset::default(),
            NowTime::new(midsummer(), hours),
        )
    }

    fn tromso(date: CivilDate) -> Target {
        Target::new(
            Location::new(69.6492, 18.9553),
            date,
            TwilightAltitude::Daylight,
            HourOffset::default(),
            NowTime::new(date, 0.0),
        )
    }

    #[test]
    fn test_poll_boundaries() {
        let window = greenwich_at(0.0).offset_window().unwrap();

        // Closed at rise, open at set.
        assert_eq!(greenwich_at(window.rise).poll(), PollOutcome::Day);
        assert_eq!(greenwich_at(window.set).poll(), PollOutcome::Night);
        assert_eq!(greenwich_at(window.set - 1e-6).poll(), PollOutcome::Day);
        assert_eq!(greenwich_at(window.rise - 1e-6).poll(), PollOutcome::Night);
        assert_eq!(greenwich_at(12.0).poll(), PollOutcome::Day);
        assert_eq!(greenwich_at(23.5).poll(), PollOutcome::Night);
    }

    #[test]
    fn test_poll_offset_narrows_day() {
        let mut target = greenwich_at(4.0);
        assert_eq!(target.poll(), PollOutcome::Day);
        target.offset = HourOffset(1.0);
        assert_eq!(target.poll(), PollOutcome::Night);
        let window = target.offset_window().unwrap();
        assert!((window.rise - 4.671496196386684).abs() < EPS);
        assert!((window.set - 19.378629174792817).abs() < EPS);
    }

    #[test]
    fn test_poll_polar() {
        let mut summer = tromso(midsummer());
        for hours in [0.0, 6.0, 23.9] {
            summer.now.hours = hours;
            assert_eq!(summer.poll(), PollOutcome::Day);
        }
        let mut winter = tromso(CivilDate::new(2013, 12, 21));
        for hours in [0.0, 10.7, 12.0] {
            winter.now.hours = hours;
            assert_eq!(winter.poll(), PollOutcome::Night);
        }
    }

    #[test]
    fn test_wait_for_passed_rise_does_not_sleep() {
        let target = greenwich_at(10.0);
        let mut sleeper = RecordingSleeper::default();

        let outcome = target.wait(Edge::Rise, WaitMode::Real, &mut sleeper);
        assert_eq!(outcome, WaitOutcome::EventAlreadyPassed);
        assert!(sleeper.calls.is_empty());
        assert_eq!(ExitStatus::from(outcome), ExitStatus::Error);

        // Debug mode follows the same branch.
        let outcome = target.wait(Edge::Rise, WaitMode::Debug(DEBUG_WAIT), &mut sleeper);
        assert_eq!(outcome, WaitOutcome::EventAlreadyPassed);
        assert!(sleeper.calls.is_empty());
    }

    #[test]
    fn test_wait_for_set_same_day() {
        let target = greenwich_at(10.0);
        let hours = target.wait_hours(Edge::Set).unwrap();
        assert!((hours - 10.378629174792817).abs() < EPS);

        let mut sleeper = RecordingSleeper::default();
        assert_eq!(
            target.wait(Edge::Set, WaitMode::Real, &mut sleeper),
            WaitOutcome::Ok
        );
        assert_eq!(sleeper.calls.len(), 1);
        assert!((sleeper.calls[0].as_secs_f64() - hours * 3600.0).abs() < 1e-3);
    }

    #[test]
    fn test_wait_crosses_midnight() {
        let tomorrow = CivilDate::new(2013, 6, 22);
        let mut target = greenwich_at(22.0);
        target.date = tomorrow;

        let rise = target.offset_window().unwrap().rise;
        let hours = target.wait_hours(Edge::Rise).unwrap();
        assert!((hours - (rise + 24.0 - 22.0)).abs() < EPS);
        assert!(hours > 5.0 && hours < 6.0);
    }

    #[test]
    fn test_wait_for_earlier_date_has_passed() {
        let mut target = greenwich_at(1.0);
        target.date = CivilDate::new(2013, 6, 20);
        assert!(matches!(
            target.wait_hours(Edge::Set),
            Err(WaitError::EventAlreadyPassed(_))
        ));
    }

    #[test]
    fn test_wait_debug_substitutes_interval() {
        let target = greenwich_at(1.0);
        let mut sleeper = RecordingSleeper::default();
        let outcome = target.wait(Edge::Rise, WaitMode::Debug(DEBUG_WAIT), &mut sleeper);
        assert_eq!(outcome, WaitOutcome::Ok);
        assert_eq!(sleeper.calls, vec![Duration::from_secs(60)]);
    }

    #[test]
    fn test_wait_polar_has_no_crossing() {
        let target = tromso(midsummer());
        assert_eq!(
            target.wait_hours(Edge::Set),
            Err(WaitError::NoCrossing(DayType::PolarDay))
        );
        let mut sleeper = RecordingSleeper::default();
        assert_eq!(
            target.wait(Edge::Set, WaitMode::Real, &mut sleeper),
            WaitOutcome::NoCrossing
        );
        assert!(sleeper.calls.is_empty());
    }

    #[test]
    fn test_list_advances_one_day_at_a_time() {
        let date = CivilDate::new(2013, 3, 10);
        let target = Target::new(
            Location::new(55.752163, 37.617524),
            date,
            TwilightAltitude::Civil,
            HourOffset::default(),
            NowTime::new(date, 12.0),
        );

        let mut list = target.list(3);
        assert_eq!(list.len(), 3);

        let expected = [
            (3.4001865709123056, 15.937703539696146),
            (3.3576697929244395, 15.971776966223775),
            (3.314949504779018, 16.00586749478857),
        ];
        for (i, (rise, set)) in expected.iter().enumerate() {
            let entry = list.next().unwrap();
            assert_eq!(entry.index, i as u32);
            assert_eq!(entry.day_count, target.day_count() + i as i64);
            assert_eq!(entry.day_type, DayType::Normal);
            let window = entry.window.unwrap();
            assert!((window.rise - rise).abs() < EPS);
            assert!((window.set - set).abs() < EPS);
        }
        assert!(list.next().is_none());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_list_applies_offset_and_polar_days() {
        let mut target = tromso(CivilDate::new(2013, 5, 15));
        target.offset = HourOffset(0.5);
        let entries: Vec<ListEntry> = target.list(60).collect();
        assert_eq!(entries.len(), 60);
        assert!(entries.iter().any(|e| e.day_type == DayType::PolarDay));
        for entry in &entries {
            match entry.day_type {
                DayType::Normal => assert!(entry.window.is_some()),
                _ => assert!(entry.window.is_none()),
            }
        }
    }

    #[test]
    fn test_report_keeps_target_altitude() {
        let mut target = greenwich_at(9.0);
        target.altitude = TwilightAltitude::Civil;
        target.offset = HourOffset(0.25);

        let report = target.report();
        assert_eq!(target.altitude, TwilightAltitude::Civil);
        assert_eq!(report.target.altitude, TwilightAltitude::Civil);
        assert_eq!(report.target.events, target.events());
        assert_eq!(report.offset_window, target.offset_window());

        let altitudes: Vec<TwilightAltitude> = report.presets.iter().map(|p| p.altitude).collect();
        assert_eq!(altitudes, TwilightAltitude::PRESETS.to_vec());
        assert_eq!(report.presets[1].events, report.target.events);

        // Astronomical twilight never ends here in June.
        assert_eq!(report.presets[3].events.day_type(), DayType::PolarDay);
        let durations = report.twilight_durations();
        assert_eq!(durations.len(), 3);
        assert!((durations[2] - (24.0 - report.presets[2].day_length) / 2.0).abs() < EPS);

        // Poll still answers for the civil target afterwards.
        assert_eq!(target.poll(), PollOutcome::Day);
    }

    #[test]
    fn test_exit_status_codes() {
        assert_eq!(ExitStatus::Ok.code(), 0);
        assert_eq!(ExitStatus::Error.code(), 1);
        assert_eq!(ExitStatus::from(PollOutcome::Day).code(), 2);
        assert_eq!(ExitStatus::from(PollOutcome::Night).code(), 3);
        assert_eq!(ExitStatus::from(WaitOutcome::NoCrossing).label(), "ERROR");
    }
}
