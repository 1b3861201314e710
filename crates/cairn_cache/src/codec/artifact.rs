//! Encoding of artifact identifiers.

use std::io::{Read, Write};

use crate::codec::component::{ComponentIdentifierCodec, DefaultComponentIdentifierCodec};
use crate::codec::wire;
use crate::error::CodecError;
use crate::identifier::{
    ArtifactName, ComponentArtifactIdentifier, ComponentIdentifier,
    ModuleComponentArtifactIdentifier,
};

/// Variant tag for module artifact identifiers. Other values are reserved.
const MODULE_ARTIFACT_TAG: u8 = 0;

/// Reversible binary codec for [`ComponentArtifactIdentifier`].
///
/// Layout of an encoded module artifact:
///
/// ```text
/// [variant tag: u8 = 0]
/// [owner: written by the component codec]
/// [name: u64 LE length + UTF-8]
/// [type: u64 LE length + UTF-8]
/// [extension: u8 presence flag, then string if 1]
/// [classifier: u8 presence flag, then string if 1]
/// ```
///
/// Two codecs compare equal when their component codecs do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ArtifactIdentifierCodec<C = DefaultComponentIdentifierCodec> {
    component_codec: C,
}

impl<C: ComponentIdentifierCodec> ArtifactIdentifierCodec<C> {
    /// Creates a codec that delegates owner encoding to `component_codec`.
    pub fn new(component_codec: C) -> Self {
        Self { component_codec }
    }

    /// Returns the codec used for the owning component.
    pub fn component_codec(&self) -> &C {
        &self.component_codec
    }

    /// Writes `id` to `out`.
    ///
    /// The record is assembled in memory first and written with a single
    /// `write_all`: if encoding fails, nothing reaches `out`.
    pub fn write<W: Write>(
        &self,
        out: &mut W,
        id: &ComponentArtifactIdentifier,
    ) -> Result<(), CodecError> {
        let buf = self.encode_to_vec(id)?;
        out.write_all(&buf)?;
        Ok(())
    }

    /// Encodes `id` into a new buffer.
    pub fn encode_to_vec(&self, id: &ComponentArtifactIdentifier) -> Result<Vec<u8>, CodecError> {
        let ComponentArtifactIdentifier::Module(module) = id else {
            return Err(CodecError::UnsupportedIdentifierVariant {
                variant: id.variant_name(),
            });
        };

        let mut buf = Vec::new();
        wire::write_u8(&mut buf, "variant", MODULE_ARTIFACT_TAG)?;
        self.component_codec
            .write(&mut buf, &ComponentIdentifier::Module(module.owner.clone()))?;
        wire::write_str(&mut buf, "name", &module.name.name)?;
        wire::write_str(&mut buf, "type", &module.name.artifact_type)?;
        wire::write_opt_str(&mut buf, "extension", module.name.extension.as_deref())?;
        wire::write_opt_str(&mut buf, "classifier", module.name.classifier.as_deref())?;
        Ok(buf)
    }

    /// Reads one identifier from `input`.
    ///
    /// Consumes exactly the bytes of one record. A truncated or corrupt
    /// record yields [`CodecError::Malformed`] and no identifier.
    pub fn read<R: Read>(&self, input: &mut R) -> Result<ComponentArtifactIdentifier, CodecError> {
        let input: &mut dyn Read = input;

        let tag = wire::read_u8(input, "variant")?;
        if tag != MODULE_ARTIFACT_TAG {
            return Err(CodecError::Malformed {
                field: "variant",
                reason: format!("unknown artifact identifier tag {tag}"),
            });
        }

        let owner = match self.component_codec.read(input)? {
            ComponentIdentifier::Module(owner) => owner,
            other => {
                return Err(CodecError::UnexpectedOwner {
                    found: other.to_string(),
                })
            }
        };
        let name = wire::read_string(input, "name")?;
        let artifact_type = wire::read_string(input, "type")?;
        let extension = wire::read_opt_string(input, "extension")?;
        let classifier = wire::read_opt_string(input, "classifier")?;

        Ok(ModuleComponentArtifactIdentifier::new(
            owner,
            ArtifactName {
                name,
                artifact_type,
                extension,
                classifier,
            },
        )
        .into())
    }

    /// Decodes one identifier from the front of `bytes`.
    ///
    /// Returns the identifier and the number of bytes consumed.
    pub fn decode_from_slice(
        &self,
        bytes: &[u8],
    ) -> Result<(ComponentArtifactIdentifier, usize), CodecError> {
        let mut rest = bytes;
        let id = self.read(&mut rest)?;
        Ok((id, bytes.len() - rest.len()))
    }
}
