pub use scorebook_test_support::proptest_prelude::proptest_config;
