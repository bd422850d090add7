//! Tests for log level functionality.

use cascadelog::Level;

#[test]
fn level_ordering() {
    assert!(Level::Debug < Level::Info);
    assert!(Level::Info < Level::Warn);
    assert!(Level::Warn < Level::Error);
    assert!(Level::Error < Level::Panic);
    assert!(Level::Panic < Level::Fatal);
    assert_eq!(Level::MIN, Level::Debug);
    assert_eq!(Level::MAX, Level::Fatal);
}

#[test]
fn level_display() {
    let names: Vec<String> = Level::all().iter().map(ToString::to_string).collect();
    assert_eq!(names, ["DEBUG", "INFO", "WARN", "ERROR", "PANIC", "FATAL"]);
}

#[test]
fn level_from_str() {
    assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
    assert_eq!("  Warn\n".parse::<Level>().unwrap(), Level::Warn);
    assert_eq!("FATAL".parse::<Level>().unwrap(), Level::Fatal);
}

#[test]
fn level_from_str_invalid() {
    assert!("warning".parse::<Level>().is_err());
    assert!("".parse::<Level>().is_err());
}

#[test]
fn lenient_parse_falls_back_to_info() {
    assert_eq!(Level::parse(" error "), Level::Error);
    assert_eq!(Level::parse("panic"), Level::Panic);
    assert_eq!(Level::parse("verbose"), Level::Info);
    assert_eq!(Level::parse(""), Level::Info);
}

#[test]
fn level_default() {
    assert_eq!(Level::default(), Level::Debug);
}

#[test]
fn and_above_walks_to_max() {
    let levels: Vec<Level> = Level::Warn.and_above().collect();
    assert_eq!(levels, [Level::Warn, Level::Error, Level::Panic, Level::Fatal]);
    assert_eq!(Level::Fatal.and_above().count(), 1);
    assert_eq!(Level::Debug.and_above().count(), 6);
}
