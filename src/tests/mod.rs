// Unit test modules for gateway-chat
//
// Each source file has a corresponding test file focused on its behavior.
// HTTP-level behavior is covered by the wiremock suites under tests/.

pub mod helpers;

pub mod error;
