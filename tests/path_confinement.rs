use pasvftpd::core_path::VirtualRoot;
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("..".to_string()),
        Just(".".to_string()),
        Just(String::new()),
        "[a-z]{1,6}",
    ]
}

fn client_path() -> impl Strategy<Value = String> {
    (any::<bool>(), prop::collection::vec(segment(), 0..8))
        .prop_map(|(absolute, parts)| {
            let joined = parts.join("/");
            if absolute {
                format!("/{}", joined)
            } else {
                joined
            }
        })
}

proptest! {
    #[test]
    fn resolved_paths_stay_inside_root(cwd in client_path(), arg in client_path()) {
        let dir = tempfile::tempdir().unwrap();
        let root = VirtualRoot::new(dir.path()).unwrap();
        let cwd = match root.resolve("/", &cwd) {
            Some(resolved) => resolved.virtual_path().to_string(),
            None => "/".to_string(),
        };

        if let Some(resolved) = root.resolve(&cwd, &arg) {
            prop_assert!(resolved.real().starts_with(root.path()));
            prop_assert!(resolved.virtual_path().starts_with('/'));
            prop_assert!(!resolved.virtual_path().contains(".."));
            prop_assert_eq!(root.virtual_path_of(resolved.real()), resolved.virtual_path());
        }
    }

    #[test]
    fn escaping_the_root_is_refused(depth in 1usize..6, tail in "[a-z]{1,6}") {
        let dir = tempfile::tempdir().unwrap();
        let root = VirtualRoot::new(dir.path()).unwrap();
        let arg = format!("{}{}", "../".repeat(depth), tail);
        prop_assert!(root.resolve("/", &arg).is_none());
    }
}
