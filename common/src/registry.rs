//! Result kinds and the shape each one decodes into.
//!
//! Parsing a raw [`KindTag`] into a [`ResultKind`] is the only place a kind is
//! validated; everything downstream works with the closed enum.

use crate::error::{Result, ResultError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    List,
    Info,
    Message,
    JobSubmitted,
    Error,
}

impl ResultKind {
    pub const ALL: [ResultKind; 5] = [
        ResultKind::List,
        ResultKind::Info,
        ResultKind::Message,
        ResultKind::JobSubmitted,
        ResultKind::Error,
    ];

    /// Numeric code used on the wire.
    pub fn code(&self) -> i64 {
        match self {
            ResultKind::List => 0,
            ResultKind::Info => 1,
            ResultKind::Message => 2,
            ResultKind::JobSubmitted => 3,
            ResultKind::Error => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResultKind::List => "list",
            ResultKind::Info => "info",
            ResultKind::Message => "msg",
            ResultKind::JobSubmitted => "job",
            ResultKind::Error => "error",
        }
    }

    pub fn shape(&self) -> ShapeDescriptor {
        match self {
            ResultKind::List => ShapeDescriptor::JobList,
            ResultKind::Info => ShapeDescriptor::JobDetail,
            ResultKind::Message | ResultKind::JobSubmitted => ShapeDescriptor::Message,
            ResultKind::Error => ShapeDescriptor::Error,
        }
    }
}

impl std::fmt::Display for ResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i64> for ResultKind {
    type Error = ResultError;

    fn try_from(code: i64) -> Result<Self> {
        ResultKind::ALL
            .into_iter()
            .find(|k| k.code() == code)
            .ok_or_else(|| ResultError::UnknownKind(code.to_string()))
    }
}

impl FromStr for ResultKind {
    type Err = ResultError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return ResultKind::try_from(code);
        }
        match trimmed.to_lowercase().as_str() {
            "list" => Ok(ResultKind::List),
            "info" => Ok(ResultKind::Info),
            "msg" | "message" => Ok(ResultKind::Message),
            "job" | "job-submitted" | "job_submitted" => Ok(ResultKind::JobSubmitted),
            "error" | "err" => Ok(ResultKind::Error),
            _ => Err(ResultError::UnknownKind(s.to_string())),
        }
    }
}

/// Kind discriminator as it arrives from upstream: either the numeric code or
/// its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KindTag {
    Code(i64),
    Name(String),
}

impl From<ResultKind> for KindTag {
    fn from(kind: ResultKind) -> Self {
        KindTag::Code(kind.code())
    }
}

impl std::fmt::Display for KindTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KindTag::Code(c) => write!(f, "{}", c),
            KindTag::Name(n) => f.write_str(n),
        }
    }
}

impl TryFrom<&KindTag> for ResultKind {
    type Error = ResultError;

    fn try_from(tag: &KindTag) -> Result<Self> {
        match tag {
            KindTag::Code(code) => ResultKind::try_from(*code),
            KindTag::Name(name) => name.parse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeDescriptor {
    JobList,
    JobDetail,
    Message,
    Error,
}

impl ShapeDescriptor {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeDescriptor::JobList => "JobResultList",
            ShapeDescriptor::JobDetail => "JobResult",
            ShapeDescriptor::Message => "JobResultMsg",
            ShapeDescriptor::Error => "JobResultErr",
        }
    }
}

impl std::fmt::Display for ShapeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub fn shape_for(tag: &KindTag) -> Result<ShapeDescriptor> {
    ResultKind::try_from(tag).map(|kind| kind.shape())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_kind_has_a_shape() {
        for kind in ResultKind::ALL {
            let shape = shape_for(&KindTag::from(kind)).unwrap();
            assert_eq!(shape, kind.shape());
            // stable across calls
            assert_eq!(shape_for(&KindTag::Name(kind.name().to_string())).unwrap(), shape);
        }
    }

    #[test]
    fn test_message_and_job_share_shape() {
        assert_eq!(ResultKind::Message.shape(), ResultKind::JobSubmitted.shape());
        let distinct: HashSet<ShapeDescriptor> = ResultKind::ALL.iter().map(|k| k.shape()).collect();
        assert_eq!(distinct.len(), 4);
        let names: HashSet<&str> = distinct.iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_unknown_tags_rejected() {
        for tag in [
            KindTag::Code(5),
            KindTag::Code(-1),
            KindTag::Name("lists".to_string()),
            KindTag::Name(String::new()),
        ] {
            match shape_for(&tag) {
                Err(ResultError::UnknownKind(_)) => {}
                other => panic!("expected UnknownKind for {}, got {:?}", tag, other),
            }
        }
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("LIST".parse::<ResultKind>().unwrap(), ResultKind::List);
        assert_eq!("message".parse::<ResultKind>().unwrap(), ResultKind::Message);
        assert_eq!("3".parse::<ResultKind>().unwrap(), ResultKind::JobSubmitted);
        assert!("9".parse::<ResultKind>().is_err());
    }

    #[test]
    fn test_kind_tag_wire_form() {
        let code: KindTag = serde_json::from_str("1").unwrap();
        assert_eq!(code, KindTag::Code(1));
        let name: KindTag = serde_json::from_str("\"info\"").unwrap();
        assert_eq!(ResultKind::try_from(&name).unwrap(), ResultKind::Info);
    }
}
