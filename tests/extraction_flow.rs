// tests/extraction_flow.rs
use job_exporter::browser::{DispatchOutcome, Extension, TriggerSignal, EXTRACT_COMMAND};
use job_exporter::error::DispatchError;
use job_exporter::export::{
    ConflictAction, Downloads, ExportDocument, FsDownloads, DEFAULT_USER_ID, EXPORT_KEYS,
};
use job_exporter::linkedin::{EmploymentType, Page, WorkSettingType};
use job_exporter::messaging::Message;
use std::path::Path;
use std::sync::Arc;

const FIXTURE: &str = include_str!("fixtures/job_posting.html");
const URL: &str = "https://www.linkedin.com/jobs/view/3900000001/";
const FILENAME: &str = "AcmeInc_Senior_SWE_job_details.yaml";

const DESCRIPTION: &str = "About the job\n\n\
Acme builds rockets: fast, safe & \"reusable\".\n\n\
What you'll do\n\n\
Design the telemetry pipeline\n\
Review code # daily\n\n\
Salary: $150k - $200k\n\
Equity: yes";

fn extension_in(dir: &Path, conflict_action: ConflictAction) -> (Extension, Arc<FsDownloads>) {
    let downloads = Arc::new(FsDownloads::new(dir, conflict_action));
    let extension = Extension::with_downloads(DEFAULT_USER_ID, downloads.clone());
    (extension, downloads)
}

async fn press_shortcut(extension: &Extension) {
    match extension
        .trigger(TriggerSignal::Command(EXTRACT_COMMAND.to_string()))
        .unwrap()
    {
        DispatchOutcome::Dispatched(receipt) => receipt.completed().await.unwrap(),
        DispatchOutcome::Busy => panic!("dispatcher unexpectedly busy"),
        DispatchOutcome::Ignored => panic!("shortcut ignored"),
    }
}

#[tokio::test]
async fn shortcut_exports_the_active_page() {
    let dir = tempfile::tempdir().unwrap();
    let (extension, downloads) = extension_in(dir.path(), ConflictAction::Uniquify);
    extension.open_page(Page::new(URL, FIXTURE));

    press_shortcut(&extension).await;

    let history = downloads.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].filename, FILENAME);

    let yaml = std::fs::read_to_string(dir.path().join(FILENAME)).unwrap();
    assert!(yaml.contains("description: |-\n  About the job\n\n  Acme builds rockets"));

    let mapping: serde_yaml::Mapping = serde_yaml::from_str(&yaml).unwrap();
    let keys: Vec<&str> = mapping.keys().filter_map(|k| k.as_str()).collect();
    assert_eq!(keys, EXPORT_KEYS);

    let doc: ExportDocument = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(doc.title, "Senior SWE");
    assert_eq!(doc.company, "Acme, Inc.!");
    assert_eq!(doc.user_id, DEFAULT_USER_ID);
    assert_eq!(doc.status, "added");
    assert_eq!(doc.country, "US");
    assert_eq!(doc.city, "San Francisco");
    assert_eq!(doc.work_setting_type, WorkSettingType::Remote);
    assert_eq!(doc.employment_type, EmploymentType::Fulltime);
    assert_eq!(doc.platform, "LinkedIn");
    assert_eq!(doc.url, URL);
    assert_eq!(doc.notes, "");
    assert_eq!(doc.description, DESCRIPTION);
}

#[tokio::test]
async fn repeated_triggers_export_once_each() {
    let dir = tempfile::tempdir().unwrap();
    let (extension, downloads) = extension_in(dir.path(), ConflictAction::Uniquify);
    extension.open_page(Page::new(URL, FIXTURE));

    press_shortcut(&extension).await;
    press_shortcut(&extension).await;

    let names: Vec<String> = downloads
        .history()
        .into_iter()
        .map(|item| item.filename)
        .collect();
    assert_eq!(
        names,
        vec![
            FILENAME.to_string(),
            "AcmeInc_Senior_SWE_job_details (1).yaml".to_string()
        ]
    );
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[tokio::test]
async fn overwrite_keeps_a_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let (extension, downloads) = extension_in(dir.path(), ConflictAction::Overwrite);
    extension.open_page(Page::new(URL, FIXTURE));

    press_shortcut(&extension).await;
    press_shortcut(&extension).await;

    assert_eq!(downloads.history().len(), 2);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn trigger_during_extraction_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (extension, downloads) = extension_in(dir.path(), ConflictAction::Uniquify);
    extension.open_page(Page::new(URL, FIXTURE));

    let first = match extension.trigger(TriggerSignal::ButtonClick).unwrap() {
        DispatchOutcome::Dispatched(receipt) => receipt,
        _ => panic!("first click was not dispatched"),
    };
    assert!(extension.is_busy());
    assert!(matches!(
        extension.trigger(TriggerSignal::ButtonClick),
        Ok(DispatchOutcome::Busy)
    ));

    first.completed().await.unwrap();
    assert!(!extension.is_busy());
    assert_eq!(downloads.history().len(), 1);

    press_shortcut(&extension).await;
    assert_eq!(downloads.history().len(), 2);
}

#[tokio::test]
async fn trigger_needs_an_active_tab() {
    let dir = tempfile::tempdir().unwrap();
    let (extension, downloads) = extension_in(dir.path(), ConflictAction::Uniquify);

    assert!(matches!(
        extension.trigger(TriggerSignal::ButtonClick),
        Err(DispatchError::NoActiveTab)
    ));
    assert!(!extension.is_busy());
    assert!(downloads.history().is_empty());
}

#[tokio::test]
async fn other_commands_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let (extension, downloads) = extension_in(dir.path(), ConflictAction::Uniquify);
    extension.open_page(Page::new(URL, FIXTURE));

    assert!(matches!(
        extension.trigger(TriggerSignal::Command("_execute_action".to_string())),
        Ok(DispatchOutcome::Ignored)
    ));
    assert!(downloads.history().is_empty());
}

#[tokio::test]
async fn active_tab_decides_what_is_exported() {
    let dir = tempfile::tempdir().unwrap();
    let (extension, downloads) = extension_in(dir.path(), ConflictAction::Uniquify);
    let job_tab = extension.open_page(Page::new(URL, FIXTURE));
    extension.open_page(Page::new("https://www.linkedin.com/feed/", "<html></html>"));

    press_shortcut(&extension).await;
    assert_eq!(downloads.history()[0].filename, "NA_NA_job_details.yaml");

    assert!(extension.tabs().activate(job_tab));
    press_shortcut(&extension).await;
    assert_eq!(downloads.history()[1].filename, FILENAME);
}

#[tokio::test]
async fn partial_payload_still_exports() {
    let dir = tempfile::tempdir().unwrap();
    let (extension, downloads) = extension_in(dir.path(), ConflictAction::Uniquify);

    let message = Message::from_json(
        r#"{"action":"save_yaml","data":{"title":"SRE","country":"Canada"}}"#,
    )
    .unwrap();
    extension
        .background()
        .request(message)
        .unwrap()
        .wait()
        .await
        .unwrap();

    let item = downloads.history().pop().unwrap();
    assert_eq!(item.filename, "NA_SRE_job_details.yaml");

    let doc: ExportDocument =
        serde_yaml::from_str(&std::fs::read_to_string(&item.path).unwrap()).unwrap();
    assert_eq!(doc.title, "SRE");
    assert_eq!(doc.company, "N/A");
    assert_eq!(doc.country, "CA");
    assert_eq!(doc.city, "N/A");
    assert_eq!(doc.description, "N/A");
    assert_eq!(doc.work_setting_type, WorkSettingType::Unknown);
}

#[tokio::test]
async fn null_and_blank_values_export_as_sentinels() {
    let dir = tempfile::tempdir().unwrap();
    let (extension, downloads) = extension_in(dir.path(), ConflictAction::Uniquify);

    let message = Message::from_json(
        r#"{"action":"save_yaml","data":{"title":"SRE","company":"","city":null,"workSettingType":null}}"#,
    )
    .unwrap();
    extension
        .background()
        .request(message)
        .unwrap()
        .wait()
        .await
        .unwrap();

    let item = downloads.history().pop().unwrap();
    assert_eq!(item.filename, "NA_SRE_job_details.yaml");

    let doc: ExportDocument =
        serde_yaml::from_str(&std::fs::read_to_string(&item.path).unwrap()).unwrap();
    assert_eq!(doc.company, "N/A");
    assert_eq!(doc.city, "N/A");
    assert_eq!(doc.work_setting_type, WorkSettingType::Unknown);
}
