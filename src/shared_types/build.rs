use anyhow::Result;
use crux_core::typegen::TypeGen;
use piconfig_core::{
    events::{ChannelEvent, NetworkEvent, UiEvent, WizardEvent},
    types::{ChannelScheme, CommitState, Encryption, Page},
    view::PageView,
    App, ChannelOperation, ChannelOutput,
};
use std::path::PathBuf;

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=../app");

    let mut gen = TypeGen::new();

    gen.register_app::<App>()?;

    // Explicitly register domain event enums to ensure all variants are traced
    gen.register_type::<ChannelEvent>()?;
    gen.register_type::<WizardEvent>()?;
    gen.register_type::<NetworkEvent>()?;
    gen.register_type::<UiEvent>()?;

    // Explicitly register other enums to ensure all variants are traced
    gen.register_type::<Page>()?;
    gen.register_type::<CommitState>()?;
    gen.register_type::<PageView>()?;
    gen.register_type::<ChannelScheme>()?;
    gen.register_type::<Encryption>()?;
    gen.register_type::<ChannelOperation>()?;
    gen.register_type::<ChannelOutput>()?;

    let output_root = PathBuf::from("./generated");

    gen.typescript("shared_types", output_root.join("typescript"))?;

    Ok(())
}
