//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one request per connection, the
//! whole request read into a fixed-size buffer, `Connection: close` on every
//! response.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine driving one request
//! - **`parser`**: Lenient tokenizer turning a byte buffer into a request
//! - **`request`**: HTTP request representation
//! - **`body`**: Decodes the LED `state` value from JSON, form or text bodies
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Fill the read buffer
//!        └──────┬──────┘
//!               │ Request parsed (or peer hung up → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route, run handler
//!        └──────┬───────────┘
//!               │ Response + actuator command
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!            Closed → command handed back to the dispatch loop
//! ```

pub mod body;
pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
