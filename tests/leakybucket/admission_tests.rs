// tests/leakybucket/admission_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::test_clock::TestClock;
    use crate::{ENTRIES, LIMIT};
    use leaky_limiter::{
        BucketDecision, DRAIN_PER_SECOND, LeakyBucketCache, LeakyBucketConfig, bucket_key,
    };

    fn cache(clock: &TestClock) -> LeakyBucketCache<TestClock> {
        LeakyBucketCache::with_config(LeakyBucketConfig::new(10_000), clock.clone()).unwrap()
    }

    #[test]
    fn first_put_creates_bucket() {
        let clock = TestClock::new(1_000);
        let cache = cache(&clock);

        for (key, quantity) in ENTRIES {
            let decision = cache.put(key, quantity, LIMIT).unwrap();
            assert_eq!(
                decision,
                BucketDecision {
                    tokens: quantity,
                    existed: false,
                    admitted: true,
                }
            );
        }
        assert_eq!(cache.len(), 5);
    }

    #[test]
    fn buckets_drain_one_token_per_nanosecond() {
        let clock = TestClock::new(1_000);
        let cache = cache(&clock);

        for (key, quantity) in ENTRIES {
            cache.put(key, quantity, LIMIT).unwrap();
        }

        clock.advance(500);

        for (key, quantity) in ENTRIES {
            let (tokens, existed, admitted) = cache.put(key, 1, LIMIT).unwrap().into_parts();
            assert_eq!(tokens, quantity - 500 + 1);
            assert!(existed);
            assert!(admitted);
        }
    }

    #[test]
    fn bucket_fills_to_limit_then_rejects() {
        let clock = TestClock::new(0);
        let cache = cache(&clock);

        // bursts of four requests of cost 250 fit in a limit of 1000
        for n in 1..=4 {
            let decision = cache.put(9, 250, 1_000).unwrap();
            assert!(decision.admitted);
            assert_eq!(decision.tokens, 250 * n);
        }

        let rejected = cache.put(9, 250, 1_000).unwrap();
        assert!(!rejected.admitted);
        assert_eq!(rejected.tokens, 1_000);

        // after 250ns exactly one more request fits
        clock.advance(250);
        assert!(cache.put(9, 250, 1_000).unwrap().admitted);
        assert!(!cache.put(9, 250, 1_000).unwrap().admitted);
    }

    #[test]
    fn limit_may_vary_per_call() {
        let clock = TestClock::new(0);
        let cache = cache(&clock);

        assert!(cache.put(3, 600, 1_000).unwrap().admitted);
        assert!(!cache.put(3, 600, 1_000).unwrap().admitted);
        assert!(cache.put(3, 600, 2_000).unwrap().admitted);
        assert_eq!(cache.put(3, 0, 0).unwrap().into_parts(), (1_200, true, false));
    }

    #[test]
    fn clock_going_backwards_does_not_refill() {
        let clock = TestClock::new(10_000);
        let cache = cache(&clock);

        cache.put(4, 700, 1_000).unwrap();
        clock.set_time(5_000);

        let decision = cache.put(4, 0, 1_000).unwrap();
        assert_eq!(decision.tokens, 700);
        assert_eq!(clock.time(), 5_000);
    }

    #[test]
    fn full_bucket_frees_a_second_of_capacity_per_second() {
        let clock = TestClock::new(0);
        let cache = cache(&clock);

        // ten requests per second, bursts of up to five
        let cost = DRAIN_PER_SECOND / 10;
        let limit = 5 * cost;

        for _ in 0..5 {
            assert!(cache.put(6, cost, limit).unwrap().admitted);
        }
        assert!(!cache.put(6, cost, limit).unwrap().admitted);

        // a second drains ten requests' worth, more than the bucket holds
        clock.advance(DRAIN_PER_SECOND as u64);
        assert_eq!(cache.put(6, 0, limit).unwrap().tokens, 0);
        for _ in 0..5 {
            assert!(cache.put(6, cost, limit).unwrap().admitted);
        }
        assert!(!cache.put(6, cost, limit).unwrap().admitted);
    }

    #[test]
    fn idle_bucket_drains_to_empty() {
        let clock = TestClock::new(0);
        let cache = cache(&clock);

        cache.put(8, 1_000, 1_000).unwrap();
        clock.advance(1_000_000);
        assert_eq!(cache.put(8, 0, 1_000).unwrap().tokens, 0);
    }

    #[test]
    fn buckets_are_independent() {
        let clock = TestClock::new(0);
        let cache = cache(&clock);

        assert!(cache.put(1, 1_000, 1_000).unwrap().admitted);
        assert!(!cache.put(1, 1, 1_000).unwrap().admitted);
        assert!(cache.put(2, 1_000, 1_000).unwrap().admitted);
    }

    #[test]
    fn string_keys_map_to_hashed_buckets() {
        let clock = TestClock::new(0);
        let cache = cache(&clock);

        assert!(!cache.put_str("1", 1_000, LIMIT).unwrap().existed);
        assert!(!cache.put_str("2", 2_000, LIMIT).unwrap().existed);
        let again = cache.put_str("2", 500, LIMIT).unwrap();
        assert!(again.existed);
        assert_eq!(again.tokens, 2_500);
        assert_eq!(cache.len(), 2);

        // the numeric entry point addresses the same bucket
        let numeric = cache.put(bucket_key("2"), 0, LIMIT).unwrap();
        assert_eq!(numeric.into_parts(), (2_500, true, true));
    }

    #[test]
    fn explicit_time_entry_points_ignore_the_clock() {
        let clock = TestClock::new(0);
        let cache = cache(&clock);

        cache.put_str_at("tenant", 1_000, LIMIT, 100);
        let decision = cache.put_str_at("tenant", 0, LIMIT, 400);
        assert_eq!(decision.tokens, 700);
    }
}
