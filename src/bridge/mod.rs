// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the sole public-facing API of the bintable library. It wires
// the pure internal layers together into the one-shot transforms a caller (the
// CLI, a test harness) actually invokes. It is the authoritative boundary
// between the outside world (delimited text, container files) and the
// internal codec logic.
//
// Data Flow (Encode):
//
//   [stateless_api::encode_csv]  -> Receives the CSV text + config
//         |
//         `-> a. `column::splitter` parses rows and produces M encoded column streams
//         |
//         `-> b. `kernels::encode` compresses each stream with the configured codec
//         |
//         `-> c. `container::Container::to_bytes` multiplexes the payloads
//
// Data Flow (Decode, column-wise):
//
//   [stateless_api::decode_column] -> Receives container bytes + a column index
//         |
//         `-> a. `container::Container::peek_manifest` locates the payload
//         |
//         `-> b. `kernels::decode` inflates it back into a value stream
//         |
//         `-> c. `column::rehydrate` joins the values into text
//
// ====================================================================================
pub mod stateless_api;

pub use stateless_api::{
    decode_column, decode_csv, decompress_column, encode_csv, rehydrate_column, split_container,
};
