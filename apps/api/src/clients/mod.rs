// HTTP adapters for the external collaborators: the chat/extraction
// microservice, the job search index, and the filtering/scoring service.
// No other module issues outbound HTTP calls.

pub mod chat;
pub mod filter;
pub mod search;
