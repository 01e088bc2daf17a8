use async_trait::async_trait;

use crate::{CaptionError, CaptionLine, CaptionRequest};

#[async_trait]
pub trait CaptionPort: Send + Sync {
    /// Returns the caption lines of the requested track, in source order.
    async fn fetch_captions(&self, request: CaptionRequest)
        -> Result<Vec<CaptionLine>, CaptionError>;
}
