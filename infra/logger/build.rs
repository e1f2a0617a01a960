fn main() {
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_PROFILING");

    let profiling = std::env::var_os("CARGO_FEATURE_PROFILING").is_some();
    let tokio_unstable = std::env::var_os("CARGO_CFG_TOKIO_UNSTABLE").is_some();
    if profiling && !tokio_unstable {
        println!(
            "cargo:warning=roster-logger `profiling` needs RUSTFLAGS=\"--cfg tokio_unstable\"; \
             the tokio-console layer is skipped otherwise"
        );
    }
}
