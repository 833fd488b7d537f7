pub(super) fn server() -> String {
    String::from("http://127.0.0.1:8000")
}

pub(super) fn login_path() -> String {
    String::from("auth/login")
}

pub(super) fn profile_paths() -> Vec<String> {
    vec![
        String::from("auth/me"),
        String::from("users/me"),
        String::from("me"),
    ]
}

pub(super) fn redirect_url() -> String {
    String::from("http://127.0.0.1:3000/session")
}

pub(super) fn empty_string() -> String {
    String::new()
}

pub(super) fn data_dir() -> String {
    // TODO: Support Windows?
    String::from("~/.local/share/handoff")
}
