use serde::{Deserialize, Serialize};

/// Wizard pages
///
/// ```text
///   Connecting ──(GetConfig)──► Toc ◄──────────────────────────────┐
///                                │                                 │
///        ┌──────────┬────────────┼───────────┬─────────┬────────┐  │
///        ▼          ▼            ▼           ▼         ▼        ▼  │
///    Scanning    SysName      Network     Sharing    About    Review
///        │ (GetWifiList)         │                              │
///        ▼                       │                   (SetConfig)│
///      Ssid ──(password)─────────┴──────────► Toc               ▼
///                                                            Epilog
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Page {
    /// Waiting for the first configuration snapshot
    #[default]
    Connecting,
    Toc,
    Scanning,
    Ssid,
    SysName,
    Network,
    Sharing,
    About,
    Review,
    Epilog,
}

/// Progress of writing the working copy back to the device
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommitState {
    #[default]
    Idle,
    Committing,
    Committed,
}
