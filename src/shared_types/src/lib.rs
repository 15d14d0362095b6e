//! TypeScript bindings for `piconfig-core`, generated by `build.rs` into `generated/`.
