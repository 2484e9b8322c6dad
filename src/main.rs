use log::error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = vessel_route::get_arg().and_then(vessel_route::run) {
        error!("{e:#}");
        std::process::exit(1);
    }
}
