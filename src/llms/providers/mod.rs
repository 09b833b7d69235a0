//! LLM provider implementations.
//!
//! Each provider implements [`BaseLLM`](crate::llms::base_llm::BaseLLM) and
//! handles authentication, request formatting and error mapping specific to
//! that provider.
//!
//! | Provider | Module |
//! |----------|--------|
//! | Google Gemini | [`gemini`] |

pub mod gemini;
