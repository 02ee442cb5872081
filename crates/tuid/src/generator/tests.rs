use crate::{
    I62Error, NanoClock, RandSource, ThreadRandom, TimeSource, Timestamp, Tuid, TuidGenerator,
    i62::ALPHABET, tuid, tuid_string,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::thread;

struct MockTime {
    at: Timestamp,
}

impl TimeSource for MockTime {
    fn instant(&self) -> Timestamp {
        self.at
    }
}

/// Advances one nanosecond per read.
struct MockStepTime {
    nanos: AtomicI64,
}

impl MockStepTime {
    fn starting_at(seconds: i64) -> Self {
        Self {
            nanos: AtomicI64::new(seconds * 1_000_000_000),
        }
    }
}

impl TimeSource for MockStepTime {
    fn instant(&self) -> Timestamp {
        let nanos = self.nanos.fetch_add(1, Ordering::Relaxed);
        Timestamp::from_nanos(i128::from(nanos))
    }
}

struct MockRand(i32);

impl RandSource<i32> for MockRand {
    fn rand(&self) -> i32 {
        self.0
    }
}

fn assert_shape(id: &Tuid) {
    let text = id.as_str();
    assert_eq!(text.len(), Tuid::LEN);
    assert!(text.bytes().all(|b| ALPHABET.contains(&b)), "{text}");
}

#[test]
fn fields_come_from_the_collaborators() {
    let clock = MockTime {
        at: Timestamp {
            seconds: 1_564_573_699,
            nanos: 123_456_789,
        },
    };
    let generator = TuidGenerator::with_fingerprint(clock, MockRand(31_337), -4_242);
    let id = generator.next(7);

    assert_eq!(id.as_str(), "1hsn5f08M0kXzzzyta00089R0107");
    assert_eq!(id.epoch_seconds(), 1_564_573_699);
    assert_eq!(id.nanos(), 123_456_789);
    assert_eq!(id.version(), 1);
    assert_eq!(id.fingerprint(), -4_242);
    assert_eq!(id.random(), 31_337);
    assert_eq!(id.count(), 1);
    assert_eq!(id.kind(), 7);
}

#[test]
fn counter_increments_per_call() {
    let generator = TuidGenerator::with_fingerprint(
        MockTime {
            at: Timestamp::EPOCH,
        },
        MockRand(0),
        0,
    );
    let counts: Vec<i32> = (0..5).map(|_| generator.next(0).count()).collect();
    assert_eq!(counts, [1, 2, 3, 4, 5]);
}

#[test]
fn counter_wraps_in_its_field() {
    let time = MockTime {
        at: Timestamp::EPOCH,
    };
    let generator = TuidGenerator::from_components(time, MockRand(0), 0, 1_920);
    assert_eq!(generator.next(0).count(), 1_921);
    assert_eq!(generator.next(0).count(), -1_922);
    assert_eq!(generator.next(0).count(), -1_921);

    let time = MockTime {
        at: Timestamp::EPOCH,
    };
    let generator = TuidGenerator::from_components(time, MockRand(0), 0, i32::MAX);
    // the i32 counter itself wraps to i32::MIN
    assert_eq!(generator.next(0).count(), 1_548);
    assert_eq!(generator.next(0).count(), 1_549);
}

#[test]
fn fingerprint_is_truncated_to_its_field() {
    let time = MockTime {
        at: Timestamp::EPOCH,
    };
    let generator = TuidGenerator::with_fingerprint(time, MockRand(0), i64::MAX);
    assert_eq!(generator.fingerprint(), 503_620_799);
    assert_eq!(generator.next(0).fingerprint(), 503_620_799);
}

#[test]
fn process_fingerprint_is_used_by_default() {
    let generator = TuidGenerator::new(MockStepTime::starting_at(0), ThreadRandom);
    let expected = Tuid::from_components(0, 0, crate::fingerprint(), 0, 0, 0).fingerprint();
    assert_eq!(generator.fingerprint(), expected);
}

#[test]
fn sequential_ids_sort_in_generation_order() {
    let generator = TuidGenerator::new(MockStepTime::starting_at(1_564_573_699), ThreadRandom);
    let generated: Vec<String> = (0..1_001).map(|_| generator.next_string(0)).collect();
    let mut sorted = generated.clone();
    sorted.sort();
    assert_eq!(generated, sorted);
}

#[test]
fn ordering_holds_across_second_boundaries() {
    let generator = TuidGenerator::new(
        MockStepTime {
            nanos: AtomicI64::new(1_564_573_699_999_999_500),
        },
        ThreadRandom,
    );
    let ids: Vec<Tuid> = (0..1_000).map(|_| generator.next(0)).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(ids[0].epoch_seconds(), 1_564_573_699);
    assert_eq!(ids[999].epoch_seconds(), 1_564_573_700);
}

#[test]
fn nano_clock_ids_follow_the_clock() {
    let generator = TuidGenerator::new(NanoClock::default(), ThreadRandom);
    let mut last = generator.next(0);
    assert_shape(&last);
    for _ in 0..1_000 {
        let id = generator.next(0);
        assert_shape(&id);
        assert!(id.timestamp() >= last.timestamp());
        if id.timestamp() > last.timestamp() {
            assert!(id > last);
        }
        last = id;
    }
    assert_eq!(generator.clock().calibrations(), 0);
}

#[test]
fn concurrent_generation_is_unique() {
    let generator = TuidGenerator::new(NanoClock::default(), ThreadRandom);
    let ids: Vec<Tuid> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|kind| {
                let generator = &generator;
                s.spawn(move || (0..1_000).map(|_| generator.next(kind)).collect::<Vec<_>>())
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), 8_000);
    let counts: HashSet<_> = ids.iter().map(Tuid::count).collect();
    // 8000 consecutive counter values cover every two-digit slot
    assert_eq!(counts.len(), 3_844);
}

#[test]
fn generated_ids_parse_back() {
    for kind in [-1_922, -1, 0, 1, 1_921] {
        let text = tuid_string(kind);
        let id: Tuid = text.parse().unwrap();
        assert_eq!(id.as_str(), text);
        assert_eq!(id.kind(), kind);
        assert_eq!(id.version(), 1);
        assert_eq!(id.fingerprint(), crate::default_generator().fingerprint());
    }
}

#[test]
fn global_ids_track_wall_time() {
    let id = tuid(0);
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let seconds = u64::try_from(id.epoch_seconds()).unwrap();
    assert!(now.abs_diff(seconds) <= 2, "{now} vs {seconds}");
}

#[test]
fn parse_rejects_corruption() {
    let id = tuid(0);
    let mut text = id.to_string();
    text.replace_range(3..4, "_");
    assert_eq!(
        text.parse::<Tuid>(),
        Err(crate::Error::I62(I62Error::InvalidCharacter {
            byte: b'_',
            index: 3
        }))
    );
    text.pop();
    assert!(matches!(
        Tuid::parse(&text),
        Err(crate::Error::InvalidLength { len: 27 })
    ));
}
