// Resume API: owner-scoped CRUD over stored documents plus on-demand rendering.
// Content is validated here, at the API boundary, before the store sees it.

pub mod handlers;
