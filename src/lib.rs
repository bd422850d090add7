#![forbid(unsafe_code)]

//! `cascadelog` - leveled, structured logging with pooled records and
//! daily-rotating file sinks.
//!
//! A call such as `logger.with_field("user", "bob").info("logged in")` takes
//! a record from a pool, encodes it as one line of key/value text or JSON,
//! hands the bytes to every registered writer and returns the record to the
//! pool. Writers include a console splitter and single- or multi-file
//! writers that rotate at midnight and delete files past their retention.
//!
//! # Example
//!
//! ```
//! use cascadelog::{Level, Logger, TextEncoder};
//!
//! let logger = Logger::builder()
//!     .level(Level::Info)
//!     .encoder(TextEncoder::default())
//!     .console()
//!     .build();
//!
//! logger.with_field("user", "bob").info("logged in");
//! logger.infof("%d jobs queued", 3);
//! logger.debug("not written");
//! logger.close();
//! ```

pub mod cleanup;
pub mod config;
pub mod encoder;
pub mod error;
pub mod fmt;
pub mod internal;
pub mod level;
pub mod logger;
pub mod output;
pub mod record;
pub mod value;

pub use cleanup::{CleanupResult, clean_expired};
pub use config::Config;
pub use encoder::{Encoder, JsonEncoder, JsonEscape, PrefixMode, TextEncoder, TypeEncoder};
pub use error::Error;
pub use level::Level;
pub use logger::{FileBuilder, FileMode, Logger, LoggerBuilder};
pub use output::{
    Clock, ConsoleWriter, FileOptions, MultiFileWriter, Routing, SingleFileWriter, SystemClock,
    Writer,
};
pub use record::{CallerLocation, Entry, Pool, PositionSupplier, Record};
pub use value::{Complex, Field, FieldArg, IntoArgs, Opaque, Sequence, Value};
