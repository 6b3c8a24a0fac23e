use std::time::{Duration, Instant};

use crossbeam_channel::bounded;
use movements_core::{Event, VoicingStage};
use movements_services::{
    ChannelSink, EngineService, MovementsConfig, Orientation, SensorConfig, SignPolicy, SinkMessage,
};

#[test]
fn events_flow_through_worker_in_order() {
    let (sink_tx, sink_rx) = bounded(64);
    let mut service = EngineService::new(MovementsConfig::default());
    let updates = service.start(Box::new(ChannelSink::new(sink_tx))).unwrap();

    for text in ["2", "5", "dom", "motion 0.1 0"] {
        service.send(text.parse().unwrap()).unwrap();
    }

    let labels: Vec<String> = (0..4).map(|_| updates.recv().unwrap().response.label).collect();
    assert_eq!(labels, ["ii minor", "V dominant", "V7 dominant", "V7 dominant"]);

    service.stop().unwrap();

    let mut presented = 0;
    let mut silences = 0;
    for message in sink_rx.try_iter() {
        match message {
            SinkMessage::Present(_) => presented += 1,
            SinkMessage::Silence => silences += 1,
        }
    }
    // The worker silences the sink on the way out
    assert!(presented >= 3);
    assert!(silences >= 1);
}

#[test]
fn transpose_and_bass_apply_on_output_only() {
    let config = MovementsConfig {
        transpose: 12,
        bass: false,
        ..Default::default()
    };
    let (sink_tx, _sink_rx) = bounded(64);
    let mut service = EngineService::new(config);
    let updates = service.start(Box::new(ChannelSink::new(sink_tx))).unwrap();

    service.send(Event::Degree { degree: 1 }).unwrap();
    let update = updates.recv().unwrap();
    assert_eq!(update.response.voicing.notes, vec![60, 64, 67, 69]);
    assert_eq!(update.output.notes, vec![72, 76, 79, 81]);
    assert_eq!(update.output.bass, None);
}

#[test]
fn orientation_readings_are_normalized_and_throttled() {
    let config = MovementsConfig {
        sensor: SensorConfig {
            sign: SignPolicy::PositiveOnly,
            ..Default::default()
        },
        ..Default::default()
    };
    let (sink_tx, _sink_rx) = bounded(64);
    let mut service = EngineService::new(config);
    let updates = service.start(Box::new(ChannelSink::new(sink_tx))).unwrap();

    let t0 = Instant::now();
    // 9 degrees of roll -> 0.1 -> seven semitones under the pivot
    let reading = Orientation { gamma: 9.0, beta: 0.0 };
    assert!(service.send_orientation(reading, t0).unwrap());
    assert!(!service.send_orientation(reading, t0 + Duration::from_millis(10)).unwrap());

    let update = updates.recv().unwrap();
    assert_eq!(update.response.voicing.notes, vec![53, 59, 62, 68]);
    assert_eq!(update.output.stage, Some(VoicingStage::Drop2));

    // Negative roll is cut by the sign policy, leaving the deadzone chord
    let tilted_back = Orientation { gamma: -30.0, beta: 0.0 };
    assert!(service.send_orientation(tilted_back, t0 + Duration::from_millis(60)).unwrap());
    let update = updates.recv().unwrap();
    assert_eq!(update.response.voicing.notes, vec![60, 64, 67, 69]);
}

#[test]
fn dropping_the_service_stops_the_worker() {
    let (sink_tx, sink_rx) = bounded(8);
    {
        let mut service = EngineService::new(MovementsConfig::default());
        let _updates = service.start(Box::new(ChannelSink::new(sink_tx))).unwrap();
    }
    assert_eq!(sink_rx.recv_timeout(Duration::from_secs(1)), Ok(SinkMessage::Silence));
}
