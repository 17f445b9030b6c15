//! loanbot_server: REST front for the loan enquiry FAQ chatbot.
//!
//! Routes:
//!   POST /api/chat   `{"message": ..}` → `{"reply": ..}`
//!   GET  /api/test   liveness

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
