use orrery::AppConfig;

fn main() {
    env_logger::init();
    orrery::run(AppConfig::new().title("Orrery").size(1280, 720));
}
