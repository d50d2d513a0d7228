use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_new_file_at_root() {
    let node = TreeNode::new_file("a", "main.fc", None);
    assert_eq!(node.parent, ROOT_PARENT);
    assert_eq!(node.path, "main.fc");
    assert!(!node.is_dir());
    assert!(!node.is_open);
}

#[test]
fn test_new_file_under_dir() {
    let dir = TreeNode::new_dir("d", "contracts", None);
    let nested = TreeNode::new_dir("n", "lib", Some(&dir));
    let file = TreeNode::new_file("f", "utils.fc", Some(&nested));
    assert_eq!(file.parent, "n");
    assert_eq!(file.path, "contracts/lib/utils.fc");
}

#[test]
fn test_empty_parent_is_root() {
    let mut node = TreeNode::new_file("a", "main.fc", None);
    node.parent = String::new();
    assert_eq!(node.parent_id(), ROOT_PARENT);
}

#[test]
fn test_renamed_path() {
    assert_eq!(renamed_path("old.txt", "new.txt"), "new.txt");
    assert_eq!(renamed_path("dir/old.txt", "new.txt"), "dir/new.txt");
    assert_eq!(renamed_path("a/b/c.fc", "d.fc"), "a/b/d.fc");
    assert_eq!(renamed_path("", "x"), "x");
}

#[test]
fn test_name_exists_scoped_to_parent() {
    let dir = TreeNode::new_dir("d", "dir", None);
    let nodes = vec![
        TreeNode::new_file("a", "main.fc", None),
        TreeNode::new_file("b", "inner.fc", Some(&dir)),
        dir.clone(),
    ];
    assert!(name_exists(&nodes, ROOT_PARENT, "main.fc"));
    assert!(name_exists(&nodes, "", "main.fc"));
    assert!(!name_exists(&nodes, "d", "main.fc"));
    assert!(name_exists(&nodes, "d", "inner.fc"));
    assert!(!name_exists(&nodes, ROOT_PARENT, "inner.fc"));
}

#[test]
fn test_descendant_ids() {
    let root_dir = TreeNode::new_dir("d", "dir", None);
    let sub = TreeNode::new_dir("s", "sub", Some(&root_dir));
    let deep = TreeNode::new_file("f", "deep.fc", Some(&sub));
    let other = TreeNode::new_file("o", "other.fc", None);
    let nodes = vec![root_dir, sub, deep, other];

    let ids = descendant_ids(&nodes, "d");
    assert_eq!(ids.len(), 2);
    assert!(ids.contains("s"));
    assert!(ids.contains("f"));
    assert!(descendant_ids(&nodes, "o").is_empty());
}

#[test]
fn test_find_by_path() {
    let nodes = default_template();
    let state_init = find_by_path(&nodes, "stateInit.cell.ts").unwrap();
    assert!(state_init.content.as_deref().unwrap().contains("export default"));
    assert!(find_by_path(&nodes, "missing.ts").is_none());
}

#[test]
fn test_default_template_has_unique_root_names() {
    let nodes = default_template();
    assert_eq!(nodes.len(), 4);
    for node in &nodes {
        assert_eq!(node.parent, ROOT_PARENT);
        assert_eq!(node.path, node.name);
        let same = nodes.iter().filter(|n| n.name == node.name).count();
        assert_eq!(same, 1);
    }
}

#[test]
fn test_template_from_dir() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.fc"), "() main() {}").unwrap();
    fs::create_dir(dir.path().join("lib")).unwrap();
    fs::write(dir.path().join("lib").join("math.fc"), "int x;").unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join(".git").join("HEAD"), "ref").unwrap();

    let nodes = template_from_dir(dir.path()).unwrap();
    let paths: Vec<&str> = nodes.iter().map(|n| n.path.as_str()).collect();
    assert_eq!(paths, vec!["lib", "lib/math.fc", "main.fc"]);

    let lib = find_by_path(&nodes, "lib").unwrap();
    let math = find_by_path(&nodes, "lib/math.fc").unwrap();
    assert!(lib.is_dir());
    assert_eq!(math.parent, lib.id);
    assert_eq!(math.content.as_deref(), Some("int x;"));
}

#[cfg(unix)]
#[test]
fn test_template_from_dir_skips_broken_links() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.fc"), "() main() {}").unwrap();
    symlink(dir.path().join("gone.fc"), dir.path().join("link")).unwrap();

    let nodes = template_from_dir(dir.path()).unwrap();
    let paths: Vec<&str> = nodes.iter().map(|n| n.path.as_str()).collect();
    assert_eq!(paths, vec!["main.fc"]);
}

#[cfg(unix)]
#[test]
fn test_template_from_dir_follows_dir_links_once() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    let shared = tempdir().unwrap();
    fs::write(shared.path().join("math.fc"), "int x;").unwrap();
    symlink(shared.path(), dir.path().join("lib")).unwrap();
    // points back at the project root
    symlink(dir.path(), dir.path().join("self")).unwrap();

    let nodes = template_from_dir(dir.path()).unwrap();
    let paths: Vec<&str> = nodes.iter().map(|n| n.path.as_str()).collect();
    assert_eq!(paths, vec!["lib", "lib/math.fc"]);
}

#[test]
fn test_template_from_dir_rejects_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("main.fc");
    fs::write(&file, "").unwrap();
    assert!(template_from_dir(&file).is_err());
}

#[test]
fn test_tree_node_json_shape() {
    let json = r#"{"id":"a","name":"main.fc","type":"file","path":"main.fc","parent":"0"}"#;
    let node: TreeNode = serde_json::from_str(json).unwrap();
    assert_eq!(node.kind, NodeKind::File);
    assert!(!node.is_open);
    assert!(node.content.is_none());

    let value = serde_json::to_value(&node).unwrap();
    assert_eq!(value["isOpen"], false);
    assert_eq!(value["type"], "file");
}
