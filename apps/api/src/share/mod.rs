// Share tokens: a card compacted into a URL path segment.
// Encoding lives in `codec`; the HTTP surface that consumes it in `handlers`.

pub mod codec;
pub mod handlers;
