use chrono::{Local, TimeZone, Timelike, Utc};
use herald_server::{CycleScheduler, ScheduleTime, parse_schedule_times};

#[test]
fn test_parse_and_cron_conversion() {
    let time = ScheduleTime::parse("09:00").unwrap();
    assert_eq!(time.hour(), 9);
    assert_eq!(time.minute(), 0);
    assert_eq!(time.cron_expression(), "0 9 * * *");
    assert_eq!(time.scheduler_expression(), "0 0 9 * * *");
    assert_eq!(time.to_string(), "09:00");

    let late = ScheduleTime::parse("21:45").unwrap();
    assert_eq!(late.cron_expression(), "45 21 * * *");

    let short = ScheduleTime::parse("7:05").unwrap();
    assert_eq!(short.to_string(), "07:05");
}

#[test]
fn test_invalid_times_rejected() {
    for bad in ["24:00", "12:60", "12", "ab:cd", "12:5", "-1:00", "", "1:2:3", "123:00"] {
        assert!(ScheduleTime::parse(bad).is_err(), "accepted {:?}", bad);
    }
}

#[test]
fn test_parse_list_defaults() {
    let times = parse_schedule_times("09:00,15:00,21:00").unwrap();
    let hours: Vec<u32> = times.iter().map(ScheduleTime::hour).collect();
    assert_eq!(hours, vec![9, 15, 21]);

    assert!(parse_schedule_times(" 08:30 , ").unwrap().len() == 1);
    assert!(parse_schedule_times("").is_err());
    assert!(parse_schedule_times("09:00,25:00").is_err());
}

#[test]
fn test_next_after_same_day_and_rollover() {
    let time = ScheduleTime::new(15, 30).unwrap();

    let morning = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    assert_eq!(
        time.next_after(&morning),
        Some(Utc.with_ymd_and_hms(2024, 5, 1, 15, 30, 0).unwrap())
    );

    let evening = Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap();
    assert_eq!(
        time.next_after(&evening),
        Some(Utc.with_ymd_and_hms(2024, 5, 2, 15, 30, 0).unwrap())
    );

    let local = time.next_after(&Local::now()).unwrap();
    assert_eq!((local.hour(), local.minute(), local.second()), (15, 30, 0));
}

#[test]
fn test_serde_uses_text_form() {
    let time: ScheduleTime = serde_json::from_str("\"06:15\"").unwrap();
    assert_eq!(time, ScheduleTime::new(6, 15).unwrap());
    assert_eq!(serde_json::to_string(&time).unwrap(), "\"06:15\"");
    assert!(serde_json::from_str::<ScheduleTime>("\"6pm\"").is_err());
}

#[tokio::test]
async fn test_scheduler_tracks_times_and_shuts_down() {
    let mut scheduler = CycleScheduler::new();
    let nine = ScheduleTime::new(9, 0).unwrap();
    let three = ScheduleTime::new(15, 0).unwrap();

    scheduler.schedule(nine, || async { Ok(()) }).unwrap();
    scheduler.schedule(three, || async { Ok(()) }).unwrap();
    scheduler.schedule(nine, || async { Ok(()) }).unwrap();

    assert_eq!(scheduler.scheduled_times(), &[nine, three]);
    assert!(scheduler.is_scheduled(three));

    scheduler.shutdown();
    assert!(scheduler.scheduled_times().is_empty());

    let ended = scheduler.join_next().await.unwrap();
    assert!(ended.unwrap_err().is_cancelled());
}

#[tokio::test]
async fn test_empty_scheduler_has_nothing_to_join() {
    let mut scheduler = CycleScheduler::new();
    assert!(scheduler.join_next().await.is_none());
}

#[tokio::test]
async fn test_run_once_completes() {
    let mut scheduler = CycleScheduler::new();
    let (tx, rx) = tokio::sync::oneshot::channel();
    scheduler.run_once(async move {
        tx.send(()).ok();
        Ok(())
    });

    rx.await.unwrap();
    assert!(scheduler.join_next().await.unwrap().is_ok());
    assert!(scheduler.scheduled_times().is_empty());
}
