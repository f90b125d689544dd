pub mod decode;
pub mod error;
pub mod ipc;
pub mod job;
pub mod registry;

pub use decode::{decode, decode_envelope, encode, ShapedResult};
pub use error::{Result, ResultError};
pub use ipc::{ResultEnvelope, VersionInfo, SERVICE_VERSION};
pub use job::{format_time, JobDetail, JobId, JobList, JobStatus, JobSummary, SubJob, SubJobEntry, TIME_FORMAT};
pub use registry::{shape_for, KindTag, ResultKind, ShapeDescriptor};

pub const DEFAULT_CONFIG_PATH: &str = "/etc/jobctl/config.yaml";
pub const USER_CONFIG_PATH: &str = "~/.config/jobctl/config.yaml";
pub const CONFIG_ENV_VAR: &str = "JOBCTL_CONFIG";
pub const LOG_ENV_VAR: &str = "JOBCTL_LOG";
