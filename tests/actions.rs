use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tidyfs::organizer::{AutoAccept, Decision, Outcome, Prompt};
use tidyfs::{Config, Error, Result, Workspace};

struct Fixed(Decision);

impl Prompt for Fixed {
    fn decide(&self, _title: &str, _message: &str, _details: &str) -> Result<Decision> {
        Ok(self.0)
    }
}

/// Sorted relative paths of every file under `root`
fn snapshot(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

#[tokio::test]
async fn organize_by_type_sorts_into_category_folders() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.jpg"), "jpg").unwrap();
    fs::write(temp_dir.path().join("b.txt"), "txt").unwrap();
    fs::write(temp_dir.path().join("c.xyz"), "xyz").unwrap();

    let workspace = Workspace::open(temp_dir.path(), Config::default()).unwrap();
    let plan = workspace.plan_organize().unwrap();
    let log = workspace.execute(&plan, false).await.unwrap();

    assert_eq!(
        snapshot(workspace.root()),
        vec!["Documents/b.txt", "Images/a.jpg", "Others/c.xyz"]
    );
    assert_eq!(log.len(), 3);
}

#[tokio::test]
async fn organize_dry_run_changes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.jpg"), "jpg").unwrap();
    fs::write(temp_dir.path().join("song.mp3"), "mp3").unwrap();

    let workspace = Workspace::open(temp_dir.path(), Config::default()).unwrap();
    let before = snapshot(workspace.root());
    let plan = workspace.plan_organize().unwrap();
    workspace.execute(&plan, true).await.unwrap();

    assert_eq!(snapshot(workspace.root()), before);
    assert!(!workspace.root().join("Images").exists());
}

#[tokio::test]
async fn organize_twice_is_stable() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.jpg"), "jpg").unwrap();

    let workspace = Workspace::open(temp_dir.path(), Config::default()).unwrap();
    let plan = workspace.plan_organize().unwrap();
    workspace.execute(&plan, false).await.unwrap();

    // Only directories remain at the top level, so the second plan is empty
    assert!(workspace.plan_organize().unwrap().is_empty());
}

#[tokio::test]
async fn unpack_copies_nested_files_and_keeps_sources() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("photos/2024")).unwrap();
    fs::write(root.join("photos/2024/beach.jpg"), "beach").unwrap();
    fs::write(root.join("photos/cover.png"), "cover").unwrap();
    fs::write(root.join("readme.md"), "hello").unwrap();

    let workspace = Workspace::open(root, Config::default()).unwrap();
    let plan = workspace.plan_unpack().unwrap();
    workspace.execute(&plan, false).await.unwrap();

    assert_eq!(
        snapshot(workspace.root()),
        vec![
            "Unpacked/beach.jpg",
            "Unpacked/cover.png",
            "Unpacked/readme.md",
            "photos/2024/beach.jpg",
            "photos/cover.png",
            "readme.md",
        ]
    );

    // Running again finds everything already staged
    assert!(workspace.plan_unpack().unwrap().operations.is_empty());
}

#[tokio::test]
async fn folder_names_cannot_escape_the_workspace() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("ws");
    fs::create_dir_all(root.join("nested")).unwrap();
    fs::write(root.join("nested/n.txt"), "nested").unwrap();
    fs::write(root.join("a.jpg"), "jpg").unwrap();

    let mut config = Config::default();
    config.organizer.unpack_folder = "../escaped".to_string();
    config.categories[0].name = "../Images".to_string();
    assert!(matches!(config.validate(), Err(Error::Config(_))));

    // Even when validation is skipped, execution refuses to leave the folder
    let workspace = Workspace::open(&root, config).unwrap();
    let unpack = workspace.plan_unpack().unwrap();
    assert!(matches!(
        workspace.execute(&unpack, false).await,
        Err(Error::OutsideWorkspace(_))
    ));
    let organize = workspace.plan_organize().unwrap();
    assert!(matches!(
        workspace.execute(&organize, true).await,
        Err(Error::OutsideWorkspace(_))
    ));
    assert!(matches!(
        workspace.execute(&organize, false).await,
        Err(Error::OutsideWorkspace(_))
    ));

    assert!(!temp_dir.path().join("escaped").exists());
    assert!(!temp_dir.path().join("Images").exists());
    assert_eq!(snapshot(&root), vec!["a.jpg", "nested/n.txt"]);
}

#[tokio::test]
async fn declined_cluster_preview_leaves_filesystem_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("one.txt"), "budget report quarterly").unwrap();
    fs::write(temp_dir.path().join("two.txt"), "beach holiday sunshine").unwrap();

    let workspace = Workspace::open(temp_dir.path(), Config::default()).unwrap();
    let before = snapshot(workspace.root());

    let assignments = workspace.cluster_assignments().unwrap();
    let plan = workspace.plan_assignments(&assignments);
    let outcome = workspace
        .execute_with_preview("Preview Clustering", &plan, &Fixed(Decision::Decline), false)
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::Declined));
    assert_eq!(snapshot(workspace.root()), before);
}

#[tokio::test]
async fn accepted_cluster_preview_moves_files() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("one.txt"), "budget report quarterly").unwrap();
    fs::write(temp_dir.path().join("two.txt"), "beach holiday sunshine").unwrap();
    fs::write(temp_dir.path().join("image.png"), "not text").unwrap();

    let workspace = Workspace::open(temp_dir.path(), Config::default()).unwrap();
    let assignments = workspace.cluster_assignments().unwrap();
    let plan = workspace.plan_assignments(&assignments);
    let outcome = workspace
        .execute_with_preview("Preview Clustering", &plan, &Fixed(Decision::Accept), false)
        .await
        .unwrap();

    assert!(outcome.is_accepted());
    assert_eq!(
        snapshot(workspace.root()),
        vec!["Cluster_0/one.txt", "Cluster_1/two.txt", "image.png"]
    );
}

#[tokio::test]
async fn cluster_labels_stay_below_k() {
    let temp_dir = TempDir::new().unwrap();
    let texts = [
        ("a.txt", "invoice payment total due"),
        ("b.txt", "invoice payment overdue"),
        ("c.txt", "beach holiday sunset"),
        ("d.txt", "holiday beach photo"),
        ("e.txt", "rust compiler borrow checker"),
        ("f.txt", "compiler rust lifetimes"),
    ];
    for (name, content) in texts {
        fs::write(temp_dir.path().join(name), content).unwrap();
    }

    let workspace = Workspace::open(temp_dir.path(), Config::default()).unwrap();
    let assignments = workspace.cluster_assignments().unwrap();

    assert_eq!(assignments.len(), texts.len());
    for assignment in &assignments {
        match &assignment.label {
            tidyfs::Label::Cluster(id) => assert!(*id < 3),
            other => panic!("unexpected label {:?}", other),
        }
    }

    // Every file lands in exactly one cluster folder
    let plan = workspace.plan_assignments(&assignments);
    workspace
        .execute_with_preview("Preview Clustering", &plan, &AutoAccept, false)
        .await
        .unwrap();
    let after = snapshot(workspace.root());
    assert_eq!(after.len(), texts.len());
    assert!(after.iter().all(|p| p.starts_with("Cluster_")));
}

#[tokio::test]
async fn cluster_fails_on_stop_words_only() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "the and of").unwrap();

    let workspace = Workspace::open(temp_dir.path(), Config::default()).unwrap();
    assert!(matches!(workspace.cluster_assignments(), Err(Error::Library(_))));
}

#[tokio::test]
async fn predict_moves_into_predicted_categories() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("q3.txt"), "quarterly budget numbers").unwrap();
    fs::write(temp_dir.path().join("trip.txt"), "holiday photo album").unwrap();

    let workspace = Workspace::open(temp_dir.path(), Config::default()).unwrap();
    let prediction = workspace.predict_assignments().unwrap();
    assert!(prediction.accuracy.is_some());

    let plan = workspace.plan_assignments(&prediction.assignments);
    workspace
        .execute_with_preview("Preview Predictions", &plan, &AutoAccept, false)
        .await
        .unwrap();

    assert_eq!(
        snapshot(workspace.root()),
        vec!["Documents/q3.txt", "Images/trip.txt"]
    );
}

#[tokio::test]
async fn declined_predict_preview_leaves_filesystem_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("q3.txt"), "quarterly budget numbers").unwrap();

    let workspace = Workspace::open(temp_dir.path(), Config::default()).unwrap();
    let before = snapshot(workspace.root());
    let prediction = workspace.predict_assignments().unwrap();
    let plan = workspace.plan_assignments(&prediction.assignments);

    let outcome = workspace
        .execute_with_preview("Preview Predictions", &plan, &Fixed(Decision::Decline), false)
        .await
        .unwrap();

    assert!(!outcome.is_accepted());
    assert_eq!(snapshot(workspace.root()), before);
}

#[test]
fn workspace_requires_a_directory() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("file.txt");
    fs::write(&file, "x").unwrap();

    assert!(matches!(
        Workspace::open(&file, Config::default()),
        Err(Error::NotADirectory(_))
    ));
}
