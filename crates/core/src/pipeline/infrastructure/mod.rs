pub mod background_runner;
