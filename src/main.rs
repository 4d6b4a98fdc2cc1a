#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    let result = if std::env::args_os().count() <= 1 {
        visioncraft::ui::run(None)
    } else {
        visioncraft::run_cli()
    };

    if let Err(error) = result {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
