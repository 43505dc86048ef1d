pub mod config;
pub mod gateway;
pub mod pipeline;
pub mod readiness;
pub mod testing;
pub mod transcoder;

pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use gateway::{
    DriveGateway, FileDescriptor, FileGateway, GatewayConfig, GatewayError, RemoteFileId,
    TargetFolder,
};
pub use pipeline::{
    percent_complete, BatchEvent, BatchScheduler, BatchSummary, BatchTally, ItemState,
    SchedulerConfig, SchedulerError, StatusKind,
};
pub use readiness::{ReadinessGate, ReadinessState};
pub use transcoder::{Transcoder, TranscoderConfig, TranscoderError, WebpTranscoder};
