//! Turns an untyped `(kind, payload)` pair into a [`ShapedResult`].

use crate::error::{Result, ResultError};
use crate::ipc::ResultEnvelope;
use crate::job::{JobDetail, JobList};
use crate::registry::{ResultKind, ShapeDescriptor};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

/// A decoded result. The variant always agrees with the kind it was decoded
/// for; see [`ShapedResult::conforms_to`].
#[derive(Debug, Clone, PartialEq)]
pub enum ShapedResult {
    List(JobList),
    Detail(JobDetail),
    Message(String),
    Error(String),
}

impl ShapedResult {
    pub fn shape(&self) -> ShapeDescriptor {
        match self {
            ShapedResult::List(_) => ShapeDescriptor::JobList,
            ShapedResult::Detail(_) => ShapeDescriptor::JobDetail,
            ShapedResult::Message(_) => ShapeDescriptor::Message,
            ShapedResult::Error(_) => ShapeDescriptor::Error,
        }
    }

    pub fn conforms_to(&self, kind: ResultKind) -> bool {
        self.shape() == kind.shape()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JobResultList {
    #[serde(alias = "Data", deserialize_with = "null_as_empty")]
    data: JobList,
    #[serde(default, alias = "Msg")]
    #[allow(dead_code)]
    msg: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JobResult {
    // kept untyped so an explicit null can be told apart from a bad record
    #[serde(alias = "Data")]
    data: Value,
    #[serde(default, alias = "Msg")]
    #[allow(dead_code)]
    msg: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JobResultMsg {
    #[serde(alias = "Msg")]
    msg: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JobResultErr {
    #[serde(alias = "Error")]
    error: String,
}

/// A list query with no rows reports `null` rather than `[]`.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<JobList, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<JobList>::deserialize(deserializer)?.unwrap_or_default())
}

fn reinterpret<T: DeserializeOwned>(shape: ShapeDescriptor, payload: &Value) -> Result<T> {
    T::deserialize(payload).map_err(|e| ResultError::ShapeMismatch {
        expected: shape.name(),
        reason: e.to_string(),
    })
}

pub fn decode(kind: ResultKind, payload: Option<&Value>) -> Result<ShapedResult> {
    let payload = match payload {
        None | Some(Value::Null) => return Err(ResultError::NoData),
        Some(p) => p,
    };

    let shape = kind.shape();
    let result = match shape {
        ShapeDescriptor::JobList => {
            let wire: JobResultList = reinterpret(shape, payload)?;
            ShapedResult::List(wire.data)
        }
        ShapeDescriptor::JobDetail => {
            let wire: JobResult = reinterpret(shape, payload)?;
            if wire.data.is_null() {
                return Err(ResultError::NoData);
            }
            ShapedResult::Detail(reinterpret(shape, &wire.data)?)
        }
        ShapeDescriptor::Message => {
            let wire: JobResultMsg = reinterpret(shape, payload)?;
            ShapedResult::Message(wire.msg)
        }
        ShapeDescriptor::Error => {
            let wire: JobResultErr = reinterpret(shape, payload)?;
            ShapedResult::Error(wire.error)
        }
    };

    debug_assert!(result.conforms_to(kind));
    Ok(result)
}

/// Validates the envelope's kind tag, then decodes its payload.
pub fn decode_envelope(envelope: &ResultEnvelope) -> Result<(ResultKind, ShapedResult)> {
    let kind = ResultKind::try_from(&envelope.kind)?;
    let result = decode(kind, envelope.payload.as_ref())?;
    Ok((kind, result))
}

/// Wire form of a shaped result, the inverse of [`decode`].
pub fn encode(kind: ResultKind, result: &ShapedResult) -> Result<Value> {
    if !result.conforms_to(kind) {
        return Err(ResultError::InternalShape { kind, found: result.shape() });
    }
    let value = match result {
        ShapedResult::List(list) => json!({ "data": list, "msg": "" }),
        ShapedResult::Detail(job) => json!({ "data": job, "msg": "" }),
        ShapedResult::Message(text) => json!({ "msg": text }),
        ShapedResult::Error(text) => json!({ "error": text }),
    };
    Ok(value)
}
