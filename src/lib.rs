//! # Doc Assistant
//!
//! A document question-answering assistant: ingest a PDF or DOCX document,
//! store its text in a similarity-searchable collection, and answer
//! natural-language questions from the retrieved passages via a
//! chat-completion call.
//!
//! ## Pipeline
//!
//! ```text
//! ┌───────────┐   ┌───────────┐   ┌───────────┐
//! │  Extract  │──▶│  Ingest   │──▶│  SQLite   │
//! │ PDF/DOCX  │   │ embed+put │   │  entries  │
//! └───────────┘   └───────────┘   └─────┬─────┘
//!                                       │
//!                      ┌────────────────┤
//!                      ▼                ▼
//!                 ┌──────────┐    ┌──────────┐
//!                 │ Retrieve │───▶│  Answer  │
//!                 │  top-N   │    │   LLM    │
//!                 └──────────┘    └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! dqa init                      # create the store
//! dqa ingest appendix_b.pdf     # extract and index one document
//! dqa query "minimal risk"      # inspect retrieval
//! dqa ask                       # interactive question loop
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`extract`] | PDF/DOCX text extraction |
//! | [`embedding`] | Embedding provider abstraction |
//! | [`store`] | Vector store upsert/query contract |
//! | [`ingest`] | Single-document index population |
//! | [`retrieve`] | Top-N similarity retrieval |
//! | [`answer`] | Chat-completion answer generation |
//! | [`ask`] | Interactive front-end |
//! | [`db`] | Database connection and schema |

pub mod answer;
pub mod ask;
pub mod config;
pub mod db;
pub mod embedding;
pub mod extract;
pub mod ingest;
pub mod models;
pub mod retrieve;
pub mod store;
