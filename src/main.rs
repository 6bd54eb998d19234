use nuptiae::config::Config;
use nuptiae::engine::Engine;
use nuptiae::server::serve;

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load configuration: {}", err);
            std::process::exit(1);
        }
    };

    let addr = config.addr;
    let engine = Engine::new(config);

    serve(engine, addr).await;
}
