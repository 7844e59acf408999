use anyhow::bail;
use variant_lobby::fen::{PositionValidator, StructuralFenValidator};
use variant_lobby::variant::find_variant;


pub fn run(variant_name: &str, fen: &str) -> anyhow::Result<()> {
    let Some(variant) = find_variant(variant_name) else {
        bail!("Unknown variant: {}", variant_name);
    };
    match StructuralFenValidator.validate(variant, fen) {
        Ok(()) => {
            println!("OK");
            Ok(())
        }
        Err(err) => bail!("Invalid {} position {}: {}", variant.display_name, fen, err),
    }
}
