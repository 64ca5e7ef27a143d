//! HCI command path: wire layout, opcode dispatch, handlers and the
//! link-layer event queue.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     HCI Command Path                       │
//! │                                                            │
//! │  ┌──────────┐   ┌──────────┐   ┌───────────────────────┐   │
//! │  │ channels │──▶│  codec   │──▶│  engine (dispatcher)  │   │
//! │  │ (queue)  │   │ (header) │   │  → handlers           │   │
//! │  └──────────┘   └──────────┘   └───────────┬───────────┘   │
//! │                      ▲                     │               │
//! │                      └─────────────────────┘               │
//! │              command-complete written in place             │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod buffer;
pub mod channels;
pub mod codec;
pub mod engine;
pub mod opcode;
pub mod status;

mod handlers;
