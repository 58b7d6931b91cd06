// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive tester.
//
// Module responsibilities:
// - `api`: Blocking HTTP client for the Kero-Kero gateway REST API plus
//   the request/response models.
// - `supervisor`: Launches a local gateway, captures its output into a
//   `log_buffer::LogBuffer` and gates startup on `/health`.
// - `config` / `cli`: Base URL and API key resolution from flags, the
//   environment and the gateway's `.env` file.
// - `logger`: File logging through `tracing`.
// - `ui`: Menus that drive `api` and show results.
//
// Everything except `ui` is usable without a terminal, which is what the
// integration tests rely on.
pub mod api;
pub mod cli;
pub mod config;
pub mod log_buffer;
pub mod logger;
pub mod supervisor;
pub mod ui;
