mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::{Call, RecordingSink, clip};
use tonebench::{Error, PlaybackEvent, Player, Settings};

const SHORT: Duration = Duration::from_millis(15);

#[test]
fn test_fifo_order_without_overlap() {
    let sink = Arc::new(RecordingSink::new(SHORT));
    let mut player = Player::new(sink.clone()).unwrap();

    player.enqueue(clip(10)).unwrap();
    player.enqueue(clip(20)).unwrap();
    player.enqueue(clip(30)).unwrap();
    player.shutdown();

    assert_eq!(
        sink.plays(),
        vec![
            Call::PlayBegin(10),
            Call::PlayEnd(10),
            Call::PlayBegin(20),
            Call::PlayEnd(20),
            Call::PlayBegin(30),
            Call::PlayEnd(30),
        ]
    );

    let times: Vec<Instant> = sink.timed_calls().into_iter().map(|(_, t)| t).collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_enqueue_does_not_block() {
    let sink = Arc::new(RecordingSink::new(Duration::from_millis(200)));
    let player = Player::new(sink.clone()).unwrap();

    let started = Instant::now();
    for len in 1..=5 {
        player.enqueue(clip(len)).unwrap();
    }
    assert!(started.elapsed() < Duration::from_millis(100));
}

#[test]
fn test_preview_stops_previous_first() {
    let sink = Arc::new(RecordingSink::new(SHORT));
    let player = Player::new(sink.clone()).unwrap();

    player.preview(clip(100)).unwrap();
    player.preview(clip(200)).unwrap();

    assert_eq!(
        sink.calls(),
        vec![Call::Stop, Call::Start(100), Call::Stop, Call::Start(200)]
    );
}

#[test]
fn test_preview_cuts_queued_clip_short() {
    let sink = Arc::new(RecordingSink::new(Duration::from_secs(10)));
    let mut player = Player::new(sink.clone()).unwrap();

    let started = Instant::now();
    player.enqueue(clip(50)).unwrap();
    assert!(sink.wait_for(Call::PlayBegin(50), Duration::from_secs(2)));

    player.preview(clip(60)).unwrap();
    assert!(sink.wait_for(Call::PlayEnd(50), Duration::from_secs(2)));
    player.shutdown();

    assert!(started.elapsed() < Duration::from_secs(5));
    let calls = sink.calls();
    let stop = calls.iter().position(|c| *c == Call::Stop).unwrap();
    let start = calls.iter().position(|c| *c == Call::Start(60)).unwrap();
    assert!(stop < start);
}

#[test]
fn test_device_failure_keeps_worker_alive() {
    let sink = Arc::new(RecordingSink::new(SHORT).failing_on(20));
    let mut player = Player::new(sink.clone()).unwrap();

    let a = player.enqueue(clip(10)).unwrap();
    let b = player.enqueue(clip(20)).unwrap();
    let c = player.enqueue(clip(30)).unwrap();

    let mut events = Vec::new();
    while events.len() < 6 {
        match player.next_event_timeout(Duration::from_secs(2)) {
            Some(event) => events.push(event),
            None => break,
        }
    }
    assert!(player.is_running());
    player.shutdown();

    assert_eq!(events[0], PlaybackEvent::Started(a));
    assert_eq!(events[1], PlaybackEvent::Finished(a));
    assert_eq!(events[2], PlaybackEvent::Started(b));
    assert!(matches!(&events[3], PlaybackEvent::Failed { id, .. } if *id == b));
    assert_eq!(events[4], PlaybackEvent::Started(c));
    assert_eq!(events[5], PlaybackEvent::Finished(c));
}

#[test]
fn test_shutdown_joins_and_rejects() {
    let sink = Arc::new(RecordingSink::new(SHORT));
    let mut player = Player::new(sink.clone()).unwrap();
    player.enqueue(clip(10)).unwrap();

    let started = Instant::now();
    player.shutdown();
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(!player.is_running());

    assert!(matches!(player.enqueue(clip(10)), Err(Error::WorkerTerminated)));
    assert_eq!(sink.plays(), vec![Call::PlayBegin(10), Call::PlayEnd(10)]);
}

#[test]
fn test_bounded_queue_reports_full() {
    let sink = Arc::new(RecordingSink::new(Duration::from_millis(300)));
    let settings = Settings::default().with_queue_capacity(1);
    let player = Player::with_settings(sink.clone(), &settings).unwrap();

    let results: Vec<_> = (1..=3).map(|len| player.enqueue(clip(len))).collect();
    assert!(results.iter().any(|r| matches!(r, Err(Error::QueueFull(1)))));
}

#[test]
fn test_drop_abandons_pending_requests() {
    let sink = Arc::new(RecordingSink::new(Duration::from_secs(10)));
    let player = Player::new(sink.clone()).unwrap();
    player.enqueue(clip(1)).unwrap();
    assert!(sink.wait_for(Call::PlayBegin(1), Duration::from_secs(2)));
    for len in 2..=10 {
        player.enqueue(clip(len)).unwrap();
    }

    let started = Instant::now();
    drop(player);
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(sink.plays(), vec![Call::PlayBegin(1), Call::PlayEnd(1)]);
}
