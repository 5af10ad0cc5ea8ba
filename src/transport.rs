use std::future::Future;

use comment_api::{CommentApiClient, CommentApiError, CommentRequest, ResponseBody};
use futures_util::Stream;

/// Opens the streamed response for one comment request.
///
/// Implementations resolve once response headers are in: a non-success status
/// must fail here, and the returned body yields byte chunks in arrival order.
pub trait Transport {
    type Chunk: AsRef<[u8]>;
    type Body: Stream<Item = Result<Self::Chunk, CommentApiError>> + Unpin;

    fn open(
        &self,
        request: &CommentRequest,
    ) -> impl Future<Output = Result<Self::Body, CommentApiError>>;
}

impl Transport for CommentApiClient {
    type Chunk = Vec<u8>;
    type Body = ResponseBody;

    async fn open(&self, request: &CommentRequest) -> Result<Self::Body, CommentApiError> {
        self.submit(request).await
    }
}
