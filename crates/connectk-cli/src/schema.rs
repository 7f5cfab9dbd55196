pub mod match_config;
