//! End-to-end workflows against the in-memory backend.

mod support;

use pnut::core::config::Settings;
use pnut::core::domain::ItemPatch;
use pnut::core::store::paths::UserTree;
use pnut::core::store::DocumentStore;
use pnut::error::{AuthError, Error};
use support::*;

#[test]
fn test_stash_and_list_one_item() {
    let backend = Backend::new();
    let alice = backend.user("alice@example.com");

    alice.push("ls -la", None, None).unwrap();

    let entries = alice.list(None).unwrap();
    assert_eq!(entries.len(), 1);
    let item = entries[0].as_ref().unwrap();
    assert_eq!(item.text, "ls -la");
    assert_eq!(item.category, "default");
}

#[test]
fn test_share_lands_in_inbox_then_stash() {
    let backend = Backend::new();
    let alice = backend.user("alice@example.com");
    let bob = backend.user("bob@example.com");

    alice.add_user("bob@example.com").unwrap();
    let key = alice.push("df -h", None, Some("disk usage")).unwrap();
    alice.share(&key, "bob@example.com").unwrap();

    assert_eq!(bob.pending_count().unwrap(), 1);
    let pending = bob.pending().unwrap();
    let (_, share) = pending[0].as_ref().unwrap();
    assert_eq!(share.email, "alice@example.com");

    let imported = bob.import_pending().unwrap().imported;
    assert_eq!(imported.len(), 1);
    assert_eq!(bob.pending_count().unwrap(), 0);

    let item = bob.item(&imported[0]).unwrap();
    assert_eq!(item.text, "df -h");
    assert_eq!(item.note.as_deref(), Some("disk usage"));
    assert_eq!(item.category, "imported");
    assert_eq!(item.origin, "alice@example.com");
    assert!(item.is_shared());

    // The sender's copy is untouched.
    assert_eq!(texts(&alice), vec!["df -h"]);
}

#[test]
fn test_list_imports_pending_first() {
    let backend = Backend::new();
    let alice = backend.user("alice@example.com");
    let bob = backend.user("bob@example.com");
    alice.add_user("bob@example.com").unwrap();

    let key = alice.push("uptime", None, None).unwrap();
    alice.share(&key, "bob@example.com").unwrap();

    assert_eq!(texts(&bob), vec!["uptime"]);
    assert_eq!(bob.pending_count().unwrap(), 0);
}

#[test]
fn test_imported_item_is_newest() {
    let backend = Backend::new();
    let alice = backend.user("alice@example.com");
    let bob = backend.user("bob@example.com");
    alice.add_user("bob@example.com").unwrap();

    let key = alice.push("shared-earlier", None, None).unwrap();
    alice.share(&key, "bob@example.com").unwrap();
    bob.push("stashed-later", None, None).unwrap();

    assert_eq!(texts(&bob), vec!["stashed-later", "shared-earlier"]);
    assert_eq!(bob.latest().unwrap().unwrap().text, "shared-earlier");
}

#[test]
fn test_junk_in_inbox_does_not_block_list() {
    let backend = Backend::new();
    let bob = backend.user("bob@example.com");
    bob.push("ls", None, None).unwrap();

    let inbox = UserTree::new("bob@example.com").pending_entry("-junk");
    backend
        .store
        .set(&inbox, &serde_json::json!({ "data": "x" }))
        .unwrap();

    assert_eq!(texts(&bob), vec!["ls"]);
    let report = bob.import_pending().unwrap();
    assert!(report.imported.is_empty());
    assert_eq!(report.skipped.len(), 1);
}

#[test]
fn test_share_needs_contact() {
    let backend = Backend::new();
    let alice = backend.user("alice@example.com");
    let bob = backend.user("bob@example.com");

    let key = alice.push("whoami", None, None).unwrap();
    let err = alice.share(&key, "bob@example.com").unwrap_err();
    assert!(matches!(err, Error::RecipientNotFound(_)));
    assert_eq!(bob.pending_count().unwrap(), 0);
}

#[test]
fn test_share_to_unknown_account() {
    let backend = Backend::new();
    let alice = backend.user("alice@example.com");
    alice.add_user("nobody@example.com").unwrap();

    let key = alice.push("whoami", None, None).unwrap();
    let err = alice.share(&key, "nobody@example.com").unwrap_err();
    assert!(matches!(err, Error::RecipientNotFound(_)));
}

#[test]
fn test_alias_resolves_with_arguments() {
    let backend = Backend::new();
    let alice = backend.user("alice@example.com");

    let key = alice.push("kubectl apply -f ${file}", None, None).unwrap();
    alice.bind_alias(&key, "deploy").unwrap();

    let resolved = alice.resolve("deploy", &["svc.yaml"]).unwrap();
    assert_eq!(resolved.command, "kubectl apply -f svc.yaml");
    assert_eq!(resolved.item.key, key);
}

#[test]
fn test_alias_short_args_keep_placeholders() {
    let backend = Backend::new();
    let alice = backend.user("alice@example.com");

    let key = alice.push("scp ${src} ${host}:${dst}", None, None).unwrap();
    alice.bind_alias(&key, "cp").unwrap();

    let resolved = alice.resolve("cp", &["a.txt"]).unwrap();
    assert_eq!(resolved.command, "scp a.txt ${host}:${dst}");
}

#[test]
fn test_alias_dropped_with_item() {
    let backend = Backend::new();
    let alice = backend.user("alice@example.com");

    let key = alice.push("make test", None, None).unwrap();
    alice.bind_alias(&key, "t").unwrap();
    alice.remove(&key).unwrap();

    assert!(alice.list_aliases().unwrap().is_empty());
    assert!(matches!(
        alice.resolve("t", &[] as &[&str]).unwrap_err(),
        Error::NotFound { kind: "alias", .. }
    ));
}

#[test]
fn test_duplicate_alias_first_key_wins() {
    let backend = Backend::new();
    let alice = backend.user("alice@example.com");

    let first = alice.push("echo first", None, None).unwrap();
    let second = alice.push("echo second", None, None).unwrap();
    assert!(alice.bind_alias(&first, "e").unwrap().is_none());

    let clash = alice.bind_alias(&second, "e").unwrap();
    assert_eq!(clash.map(|a| a.key), Some(first.clone()));

    let resolved = alice.resolve("e", &[] as &[&str]).unwrap();
    assert_eq!(resolved.command, "echo first");
}

#[test]
fn test_oversized_item_never_written() {
    let backend = Backend::new();
    let alice = backend.user("alice@example.com");
    let writes = backend.store.write_count();

    let err = alice.push(&"x".repeat(5000), None, None).unwrap_err();
    assert!(matches!(
        err,
        Error::Capacity {
            len: 5000,
            max: 2048,
            ..
        }
    ));
    assert_eq!(backend.store.write_count(), writes);
}

#[test]
fn test_configured_limit_applies() {
    let backend = Backend::new();
    let settings = Settings {
        max_text_length: 16,
        ..Settings::default()
    };
    let alice = backend.user_with("alice@example.com", settings);

    assert!(alice.push("short", None, None).is_ok());
    assert!(matches!(
        alice.push("this one is far too long", None, None).unwrap_err(),
        Error::Capacity { max: 16, .. }
    ));
}

#[test]
fn test_deleting_category_keeps_items() {
    let backend = Backend::new();
    let alice = backend.user("alice@example.com");

    let infra = alice.add_category("infra").unwrap();
    for text in ["terraform plan", "terraform apply", "ansible-playbook site.yml"] {
        alice.push(text, Some("infra"), None).unwrap();
    }

    alice.remove_category(&infra).unwrap();
    assert!(alice.list_categories().unwrap().is_empty());

    let items = alice.list(Some("infra")).unwrap();
    assert_eq!(items.len(), 3);
    for item in items {
        assert_eq!(item.unwrap().category, "infra");
    }
}

#[test]
fn test_find_category_by_name() {
    let backend = Backend::new();
    let alice = backend.user("alice@example.com");

    let key = alice.add_category("docker").unwrap();
    let found = alice.find_category(" docker ").unwrap().unwrap();
    assert_eq!(found.key, key);
    assert!(alice.find_category("k8s").unwrap().is_none());
}

#[test]
fn test_edit_item() {
    let backend = Backend::new();
    let alice = backend.user("alice@example.com");
    let key = alice.push("git log", None, Some("history")).unwrap();

    alice
        .edit(&key, &ItemPatch::default().text("git log --oneline").note(""))
        .unwrap();

    let item = alice.item(&key).unwrap();
    assert_eq!(item.text, "git log --oneline");
    assert!(item.note.is_none());
}

#[test]
fn test_relogin_keeps_keypair() {
    let backend = Backend::new();
    let first = backend.user("alice@example.com");
    let key = first.push("pwd", None, None).unwrap();
    let public_key = first.identity().public_key().to_string();
    drop(first);

    let again = backend.user("alice@example.com");
    assert_eq!(again.identity().public_key(), public_key);
    assert_eq!(again.item(&key).unwrap().text, "pwd");
}

#[test]
fn test_unverified_account_cannot_sign_in() {
    let backend = Backend::new();
    pnut::core::vault::register(&backend.auth, "carol@example.com", PASSWORD).unwrap();

    let err = pnut::core::vault::sign_in(&backend.auth, "carol@example.com", PASSWORD)
        .unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::EmailNotVerified(_))));
}

#[test]
fn test_users_are_one_directional() {
    let backend = Backend::new();
    let alice = backend.user("alice@example.com");
    let bob = backend.user("bob@example.com");

    alice.add_user("bob@example.com").unwrap();
    assert_eq!(alice.users().unwrap(), vec!["bob@example.com"]);
    assert!(bob.users().unwrap().is_empty());

    let key = bob.push("hi", None, None).unwrap();
    assert!(bob.share(&key, "alice@example.com").is_err());
}
