mod tests {
    use crate::analytics_core::{Dispatcher, Event, RecordSchema, SlidingWindow};
    use crate::feed::FeedReader;
    use crate::sink::{EventSink, JsonlEventSink};
    use std::time::Duration;
    use tokio::io::AsyncWriteExt;

    /// Window always holds the last min(N, pushes) values in arrival order,
    /// for several capacities and push counts.
    #[test]
    fn test_window_retention_property() {
        for capacity in [1usize, 2, 5, 8] {
            let mut window = SlidingWindow::new(capacity);
            let pushed: Vec<f64> = (0..12).map(|i| i as f64 * 1.5).collect();

            for (i, &v) in pushed.iter().enumerate() {
                window.push(v);

                let expected_len = (i + 1).min(capacity);
                assert_eq!(window.len(), expected_len);

                let expected: Vec<f64> =
                    pushed[..=i].iter().rev().take(expected_len).rev().copied().collect();
                let actual: Vec<f64> = window.values().collect();
                assert_eq!(actual, expected, "capacity {}, push {}", capacity, i);
            }
        }
    }

    /// Sensor-shaped feed (temperature/continent) driven end to end through
    /// a schema-mapped dispatcher.
    #[test]
    fn test_sensor_stream_stall_and_averages() {
        let schema = RecordSchema::new("timestamp", "temperature", "continent");
        let mut dispatcher = Dispatcher::new(5, 0.2, 500.0, schema);

        let lines = [
            r#"{"timestamp":"2025-01-11T18:15:00Z","temperature":100.0,"city":"Tokyo","continent":"Asia"}"#,
            r#"{"timestamp":"2025-01-11T18:16:00Z","temperature":100.1,"city":"Tokyo","continent":"Asia"}"#,
            r#"{"timestamp":"2025-01-11T18:17:00Z","temperature":99.9,"city":"Berlin","continent":"Europe"}"#,
            r#"{"timestamp":"2025-01-11T18:18:00Z","temperature":100.05,"city":"Tokyo","continent":"Asia"}"#,
            r#"{"timestamp":"2025-01-11T18:19:00Z","temperature":100.0,"city":"Berlin","continent":"Europe"}"#,
        ];

        let mut events = Vec::new();
        for line in lines {
            events.extend(dispatcher.process_line(line));
        }

        let stalls: Vec<&Event> = events
            .iter()
            .filter(|e| matches!(e, Event::StallDetected { .. }))
            .collect();
        assert_eq!(stalls.len(), 1);
        match stalls[0] {
            Event::StallDetected { timestamp, .. } => {
                assert_eq!(timestamp, "2025-01-11T18:19:00Z");
            }
            _ => unreachable!(),
        }

        assert_eq!(dispatcher.aggregates().count("Asia"), 3);
        assert_eq!(dispatcher.aggregates().count("Europe"), 2);
        let asia_avg = dispatcher.aggregates().average("Asia").unwrap();
        assert!((asia_avg - (100.0 + 100.1 + 100.05) / 3.0).abs() < 1e-9);
    }

    /// Stats-shaped feed (ppg/team) hits the hot-streak detector only once
    /// the window is full, never earlier.
    #[test]
    fn test_stats_stream_hot_streak_gating() {
        let schema = RecordSchema::new("timestamp", "ppg", "team");
        let mut dispatcher = Dispatcher::new(5, 0.0, 20.0, schema);

        let ppg = [25.0, 26.0, 24.0, 27.0, 23.0];
        for (i, v) in ppg.iter().enumerate() {
            let line = format!(
                r#"{{"timestamp":"2025-09-14T23:3{}:00Z","ppg":{},"team":"Las Vegas Aces"}}"#,
                i, v
            );
            let events = dispatcher.process_line(&line);

            let hot = events
                .iter()
                .any(|e| matches!(e, Event::HotStreakDetected { .. }));
            if i < 4 {
                assert!(!hot, "fired before window filled (reading {})", i);
            } else {
                assert!(hot);
            }
        }
    }

    /// Mixed valid/invalid/undecodable input: bad records leave no trace.
    #[test]
    fn test_bad_records_leave_no_trace() {
        let mut dispatcher = Dispatcher::new(5, 0.2, 20.0, RecordSchema::default());

        dispatcher.process_line(r#"{"timestamp":"t0","value":10.0,"group_key":"Asia"}"#);

        let invalid = dispatcher.process_line(r#"{"timestamp":"t1","group_key":"Asia"}"#);
        assert!(matches!(invalid[0], Event::Invalid { .. }));

        let undecodable = dispatcher.process_line("not json at all");
        assert!(undecodable.is_empty());

        assert_eq!(dispatcher.window().len(), 1);
        assert_eq!(dispatcher.aggregates().count("Asia"), 1);
    }

    /// Full path: producer-style appends → feed reader → dispatcher → sink.
    #[tokio::test]
    async fn test_feed_to_sink_pipeline() {
        let temp_dir = tempfile::tempdir().unwrap();
        let feed_path = temp_dir.path().join("readings.jsonl");
        let events_path = temp_dir.path().join("events.jsonl");

        let mut feed = tokio::fs::File::create(&feed_path).await.unwrap();
        for v in [50.0, 50.1, 50.05, 49.95, 50.0] {
            let line = format!(
                "{{\"timestamp\":\"2025-01-11T18:15:00Z\",\"value\":{},\"group_key\":\"Asia\"}}\n",
                v
            );
            feed.write_all(line.as_bytes()).await.unwrap();
        }
        feed.flush().await.unwrap();
        drop(feed);

        let mut reader = FeedReader::new(feed_path).from_start();
        reader.open().await.unwrap();

        let mut dispatcher = Dispatcher::new(5, 0.2, 1000.0, RecordSchema::default());
        let mut sink = JsonlEventSink::new(&events_path).unwrap();

        for _ in 0..5 {
            let line = tokio::time::timeout(Duration::from_secs(2), reader.next_line())
                .await
                .unwrap()
                .unwrap()
                .unwrap();
            for event in dispatcher.process_line(&line) {
                sink.write_event(&event).await.unwrap();
            }
        }
        sink.flush().await.unwrap();

        let contents = std::fs::read_to_string(&events_path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1);

        let event: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(event["kind"], "StallDetected");

        assert_eq!(dispatcher.aggregates().count("Asia"), 5);
    }
}
