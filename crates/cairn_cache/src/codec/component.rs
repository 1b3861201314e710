//! Encoding of the component that owns an artifact.

use std::fmt;
use std::io::Read;

use crate::codec::wire;
use crate::error::CodecError;
use crate::identifier::{
    ComponentIdentifier, ModuleComponentIdentifier, ProjectComponentIdentifier,
};

const MODULE_TAG: u8 = 0;
const PROJECT_TAG: u8 = 1;

/// Serializer for the owner portion of an artifact identifier.
///
/// Implementations must consume exactly the bytes they produced, so that the
/// artifact codec can continue with the remaining fields.
pub trait ComponentIdentifierCodec: fmt::Debug + Send + Sync {
    /// Appends the encoding of `id` to `out`.
    fn write(&self, out: &mut Vec<u8>, id: &ComponentIdentifier) -> Result<(), CodecError>;

    /// Decodes one component identifier from `input`.
    fn read(&self, input: &mut dyn Read) -> Result<ComponentIdentifier, CodecError>;
}

/// Tag byte followed by the identifier's string fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DefaultComponentIdentifierCodec;

impl ComponentIdentifierCodec for DefaultComponentIdentifierCodec {
    fn write(&self, out: &mut Vec<u8>, id: &ComponentIdentifier) -> Result<(), CodecError> {
        match id {
            ComponentIdentifier::Module(module) => {
                wire::write_u8(out, "owner.tag", MODULE_TAG)?;
                wire::write_str(out, "owner.group", &module.group)?;
                wire::write_str(out, "owner.module", &module.module)?;
                wire::write_str(out, "owner.version", &module.version)
            }
            ComponentIdentifier::Project(project) => {
                wire::write_u8(out, "owner.tag", PROJECT_TAG)?;
                wire::write_str(out, "owner.build_path", &project.build_path)?;
                wire::write_str(out, "owner.project_path", &project.project_path)
            }
        }
    }

    fn read(&self, input: &mut dyn Read) -> Result<ComponentIdentifier, CodecError> {
        match wire::read_u8(input, "owner.tag")? {
            MODULE_TAG => {
                let group = wire::read_string(input, "owner.group")?;
                let module = wire::read_string(input, "owner.module")?;
                let version = wire::read_string(input, "owner.version")?;
                Ok(ModuleComponentIdentifier {
                    group,
                    module,
                    version,
                }
                .into())
            }
            PROJECT_TAG => {
                let build_path = wire::read_string(input, "owner.build_path")?;
                let project_path = wire::read_string(input, "owner.project_path")?;
                Ok(ProjectComponentIdentifier {
                    build_path,
                    project_path,
                }
                .into())
            }
            tag => Err(CodecError::Malformed {
                field: "owner.tag",
                reason: format!("unknown component identifier tag {tag}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(id: ComponentIdentifier) -> ComponentIdentifier {
        let codec = DefaultComponentIdentifierCodec;
        let mut out = Vec::new();
        codec.write(&mut out, &id).unwrap();
        let mut input: &[u8] = &out;
        let back = codec.read(&mut input).unwrap();
        assert!(input.is_empty(), "codec must consume its own bytes exactly");
        back
    }

    #[test]
    fn module_roundtrip() {
        let id: ComponentIdentifier =
            ModuleComponentIdentifier::new("org.example", "lib", "1.0").into();
        assert_eq!(roundtrip(id.clone()), id);
    }

    #[test]
    fn project_roundtrip() {
        let id: ComponentIdentifier = ProjectComponentIdentifier::new(":", ":app").into();
        assert_eq!(roundtrip(id.clone()), id);
    }

    #[test]
    fn unknown_tag_is_malformed() {
        let mut input: &[u8] = &[9];
        let err = DefaultComponentIdentifierCodec.read(&mut input).unwrap_err();
        assert!(matches!(err, CodecError::Malformed { field: "owner.tag", .. }));
    }
}
