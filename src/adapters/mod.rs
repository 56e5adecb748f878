//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                  |
//! |----------------|--------------------|------------------------------|
//! | `config_file`  | ConfigPort         | JSON file on disk            |
//! | `console`      | Renderer           | Terminal (ANSI colour)       |
//! |                | (input producer)   | stdin → command queue        |
//! | `http_client`  | SensorClient       | Sensor JSON endpoint (HTTP)  |
//! | `log_sink`     | EventSink          | `log` facade                 |
//! | `time`         | Clock              | `Instant` + local wall clock |

pub mod config_file;
pub mod console;
#[cfg(feature = "http")]
pub mod http_client;
pub mod log_sink;
pub mod time;
