//! Artifact and component identifiers persisted in the cache index.
//!
//! All identifiers are immutable value types with structural equality.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coordinates of a published module version, e.g. `org.example:lib:1.0`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ModuleComponentIdentifier {
    /// Group (organisation) of the module.
    pub group: String,
    /// Module name within the group.
    pub module: String,
    /// Module version.
    pub version: String,
}

impl ModuleComponentIdentifier {
    /// Creates a module component identifier.
    pub fn new(
        group: impl Into<String>,
        module: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            module: module.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ModuleComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.module, self.version)
    }
}

/// A project within a (possibly composite) build.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ProjectComponentIdentifier {
    /// Path of the build that owns the project, `:` for the root build.
    pub build_path: String,
    /// Path of the project within its build, e.g. `:app`.
    pub project_path: String,
}

impl ProjectComponentIdentifier {
    /// Creates a project component identifier.
    pub fn new(build_path: impl Into<String>, project_path: impl Into<String>) -> Self {
        Self {
            build_path: build_path.into(),
            project_path: project_path.into(),
        }
    }
}

impl fmt::Display for ProjectComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.build_path == ":" {
            write!(f, "project {}", self.project_path)
        } else {
            write!(f, "project {}{}", self.build_path, self.project_path)
        }
    }
}

/// The component that owns an artifact.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ComponentIdentifier {
    /// A published module version.
    Module(ModuleComponentIdentifier),
    /// A project in the current build.
    Project(ProjectComponentIdentifier),
}

impl From<ModuleComponentIdentifier> for ComponentIdentifier {
    fn from(id: ModuleComponentIdentifier) -> Self {
        ComponentIdentifier::Module(id)
    }
}

impl From<ProjectComponentIdentifier> for ComponentIdentifier {
    fn from(id: ProjectComponentIdentifier) -> Self {
        ComponentIdentifier::Project(id)
    }
}

impl fmt::Display for ComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentIdentifier::Module(id) => id.fmt(f),
            ComponentIdentifier::Project(id) => id.fmt(f),
        }
    }
}

/// Name, type and optional extension/classifier of an artifact file.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ArtifactName {
    /// Base name of the artifact.
    pub name: String,
    /// Artifact type, such as `jar` or `pom`.
    pub artifact_type: String,
    /// File extension, if the artifact has one.
    pub extension: Option<String>,
    /// Classifier such as `sources` or `javadoc`.
    pub classifier: Option<String>,
}

impl ArtifactName {
    /// Creates an artifact name.
    pub fn new(
        name: impl Into<String>,
        artifact_type: impl Into<String>,
        extension: Option<String>,
        classifier: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            artifact_type: artifact_type.into(),
            extension,
            classifier,
        }
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(classifier) = &self.classifier {
            write!(f, "-{classifier}")?;
        }
        if let Some(extension) = &self.extension {
            write!(f, ".{extension}")?;
        }
        Ok(())
    }
}

/// An artifact published by a module version.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ModuleComponentArtifactIdentifier {
    /// The module version that publishes the artifact.
    pub owner: ModuleComponentIdentifier,
    /// The artifact's name within the module.
    pub name: ArtifactName,
}

impl ModuleComponentArtifactIdentifier {
    /// Creates a module artifact identifier.
    pub fn new(owner: ModuleComponentIdentifier, name: ArtifactName) -> Self {
        Self { owner, name }
    }

    /// The conventional file name, e.g. `lib-1.0-sources.jar`.
    pub fn file_name(&self) -> String {
        let mut file_name = format!("{}-{}", self.name.name, self.owner.version);
        if let Some(classifier) = &self.name.classifier {
            file_name.push('-');
            file_name.push_str(classifier);
        }
        if let Some(extension) = &self.name.extension {
            file_name.push('.');
            file_name.push_str(extension);
        }
        file_name
    }
}

impl fmt::Display for ModuleComponentArtifactIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.file_name(), self.owner)
    }
}

/// A file attached to a component without module artifact metadata.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ComponentFileArtifactIdentifier {
    /// The owning component.
    pub owner: ComponentIdentifier,
    /// The file name.
    pub file_name: String,
}

impl fmt::Display for ComponentFileArtifactIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.file_name, self.owner)
    }
}

/// An artifact known only by a description, with no owning component.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct OpaqueArtifactIdentifier {
    /// Human-readable description of the artifact.
    pub display_name: String,
}

impl fmt::Display for OpaqueArtifactIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// Structured identity of a build artifact.
///
/// Only [`Module`](Self::Module) identifiers have a binary encoding; see
/// [`ArtifactIdentifierCodec`](crate::ArtifactIdentifierCodec).
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ComponentArtifactIdentifier {
    /// An artifact of a published module.
    Module(ModuleComponentArtifactIdentifier),
    /// A bare file owned by some component.
    File(ComponentFileArtifactIdentifier),
    /// An artifact with no component.
    Opaque(OpaqueArtifactIdentifier),
}

impl ComponentArtifactIdentifier {
    /// Short name of the variant, used in error messages.
    pub fn variant_name(&self) -> &'static str {
        match self {
            ComponentArtifactIdentifier::Module(_) => "module",
            ComponentArtifactIdentifier::File(_) => "file",
            ComponentArtifactIdentifier::Opaque(_) => "opaque",
        }
    }
}

impl From<ModuleComponentArtifactIdentifier> for ComponentArtifactIdentifier {
    fn from(id: ModuleComponentArtifactIdentifier) -> Self {
        ComponentArtifactIdentifier::Module(id)
    }
}

impl fmt::Display for ComponentArtifactIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentArtifactIdentifier::Module(id) => id.fmt(f),
            ComponentArtifactIdentifier::File(id) => id.fmt(f),
            ComponentArtifactIdentifier::Opaque(id) => id.fmt(f),
        }
    }
}
