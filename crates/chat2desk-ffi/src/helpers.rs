//! Helper utilities for the FFI layer

/// Process-wide Tokio runtime every deferred call runs on
pub fn get_runtime() -> &'static tokio::runtime::Runtime {
    use std::sync::OnceLock;
    static RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .thread_name("chat2desk-bridge")
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_is_shared() {
        let a = get_runtime() as *const _;
        let b = get_runtime() as *const _;
        assert_eq!(a, b);
        assert_eq!(get_runtime().block_on(async { 2 + 2 }), 4);
    }
}
