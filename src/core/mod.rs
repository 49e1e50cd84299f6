pub mod client;
pub mod cookie;
pub mod fragment;
pub mod loading;
pub mod page;
pub mod sanitize;
pub mod sequence;
pub mod submit;
pub mod transport;

pub use crate::domain::model::{
    BodyEncoding, FormSnapshot, FragmentPayload, HtmlPolicy, LoadOutcome, OrderingPolicy,
    ResponseBody, SubmitResponse,
};
pub use crate::domain::ports::{CookieSource, FormSource, TargetRegion};
pub use crate::utils::error::Result;
