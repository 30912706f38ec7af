use querylite::logger::{configure_logging, configure_logging_with_dev, parse_level};

#[test]
fn files_land_in_the_requested_dir() {
    let dir = tempfile::tempdir().unwrap();
    configure_logging(Some(dir.path()), Some("debug"), Some(2)).unwrap();
    log::info!("hello");
    assert!(dir.path().join("app.log").exists());
    assert!(!dir.path().join("dev6.log").exists());

    let dev = tempfile::tempdir().unwrap();
    configure_logging_with_dev(Some(dev.path()), Some("trace"), None, true).unwrap();
    querylite::utils::devlog::event("logger_ready", &[]);
    assert!(dev.path().join("app.log").exists());
    assert!(dev.path().join("dev6.log").exists());
}

#[test]
fn unknown_levels_default_to_info() {
    assert_eq!(parse_level("chatty"), log::LevelFilter::Info);
    assert_eq!(parse_level("Error"), log::LevelFilter::Error);
}
