//! File generator: descriptor set in, one Rust source file per schema file out.
//!
//! Each message becomes a struct; its nested messages, nested enums and
//! oneof enums live in a snake_case module named after it.
//!
//! A file is meant to be included into a module path mirroring its package,
//! `shop` into `mod shop`, `acme.billing` into `mod acme { mod billing }`,
//! all under one common root. Files sharing a package share that module, and
//! references into another package go through `super::`.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use proc_macro2::{Ident, TokenStream};
use quote::quote;

use crate::config::GeneratorConfig;
use crate::emit::Emitter;
use crate::error::{Result, SchemaError};
use crate::mapper::{self, Member, MessageBinding, ResolveType};
use crate::naming;
use crate::schema::{
    qualify, EnumDescriptor, FieldDescriptor, FieldType, FileDescriptor, FileDescriptorSet, Label,
    MessageDescriptor, TypeKind,
};

/// Generated source for one schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output path relative to the output directory.
    pub name: String,
    pub content: String,
}

impl GeneratedFile {
    /// Writes the file under `out_dir`, creating directories as needed.
    pub fn write<P: AsRef<Path>>(&self, out_dir: P) -> Result<PathBuf> {
        let path = out_dir.as_ref().join(&self.name);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, &self.content)?;

        log::info!("wrote {}", path.display());
        Ok(path)
    }
}

/// Generates bindings for every file in the set.
pub fn generate(
    set: &FileDescriptorSet,
    config: &GeneratorConfig,
) -> Result<Vec<GeneratedFile>> {
    set.validate()?;

    let emitter = Emitter::new(config)?;
    let registry = TypeRegistry::build(set)?;

    set.files
        .iter()
        .map(|file| {
            let content = FileGenerator {
                registry: &registry,
                emitter: &emitter,
            }
            .file(file)?;

            Ok(GeneratedFile {
                name: output_name(&file.name),
                content,
            })
        })
        .collect()
}

/// `shop/order.proto` becomes `shop/order.protoflat.rs`.
pub fn output_name(schema_name: &str) -> String {
    let stem = schema_name.strip_suffix(".proto").unwrap_or(schema_name);
    format!("{}.protoflat.rs", stem)
}

/// Where a declared type lives in the generated code.
#[derive(Debug, Clone)]
struct TypeEntry {
    kind: TypeKind,
    /// Modules from the package root down to the declaration.
    module: Vec<Ident>,
    ident: Ident,
}

/// Every message and enum in the set, keyed by fully qualified name
/// without the leading dot.
#[derive(Debug, Default)]
struct TypeRegistry {
    types: HashMap<String, TypeEntry>,
    /// Identifiers claimed so far in each scope's module.
    claims: HashMap<String, HashSet<String>>,
}

impl TypeRegistry {
    fn build(set: &FileDescriptorSet) -> std::result::Result<Self, SchemaError> {
        let mut registry = Self::default();
        let mut packages = HashSet::new();

        for file in set.files.iter() {
            let module = package_module(&file.package);

            // every package level is a module in its parent package
            let mut parent = String::new();
            for (segment, ident) in file.package.split('.').zip(module.iter()) {
                let package = qualify(&parent, segment);
                if packages.insert(package.clone()) {
                    registry.claim(&parent, ident)?;
                }
                parent = package;
            }

            for e in file.enums.iter() {
                let full_name = qualify(&file.package, &e.name);
                registry.insert(full_name, TypeKind::Enum, &module, &e.name)?;
            }
            for message in file.messages.iter() {
                registry.insert_message(&file.package, &module, message)?;
            }
        }

        let mut graph = EmbeddingGraph::default();
        for file in set.files.iter() {
            for message in file.messages.iter() {
                registry.embeddings(&file.package, message, &mut graph);
            }
        }
        graph.check()?;

        Ok(registry)
    }

    fn insert_message(
        &mut self,
        scope: &str,
        module: &[Ident],
        message: &MessageDescriptor,
    ) -> std::result::Result<(), SchemaError> {
        let full_name = qualify(scope, &message.name);
        self.insert(full_name.clone(), TypeKind::Message, module, &message.name)?;

        let module_ident = naming::module_ident(&message.name);
        if has_module(message) {
            self.claim(scope, &module_ident)?;
        }

        let mut inner = module.to_vec();
        inner.push(module_ident);

        for e in message.nested_enums.iter() {
            self.insert(qualify(&full_name, &e.name), TypeKind::Enum, &inner, &e.name)?;
        }
        for nested in message.nested_messages.iter() {
            self.insert_message(&full_name, &inner, nested)?;
        }
        for oneof in message.oneofs.iter() {
            self.claim(&full_name, &naming::ident(&naming::pascal_case(&oneof.name)))?;
        }

        Ok(())
    }

    fn insert(
        &mut self,
        full_name: String,
        kind: TypeKind,
        module: &[Ident],
        name: &str,
    ) -> std::result::Result<(), SchemaError> {
        let entry = TypeEntry {
            kind,
            module: module.to_vec(),
            ident: naming::ident(name),
        };

        let scope = match full_name.rfind('.') {
            Some(dot) => full_name[..dot].to_string(),
            None => String::new(),
        };
        let ident = entry.ident.clone();

        if self.types.insert(full_name.clone(), entry).is_some() {
            return Err(SchemaError::DuplicateType(full_name));
        }
        self.claim(&scope, &ident)
    }

    /// Records `ident` as taken in the module emitted for `scope`.
    fn claim(&mut self, scope: &str, ident: &Ident) -> std::result::Result<(), SchemaError> {
        let ident = ident.to_string();

        match self.claims.entry(scope.to_string()).or_default().insert(ident.clone()) {
            true => Ok(()),
            false => Err(SchemaError::DuplicateIdentifier {
                scope: match scope.is_empty() {
                    true => ".".to_string(),
                    false => scope.to_string(),
                },
                ident,
            }),
        }
    }

    /// Finds `type_name` the way schema scoping works: a leading dot is
    /// absolute, anything else is tried from the innermost scope outwards.
    fn lookup(&self, scope: &str, type_name: &str) -> Option<(String, &TypeEntry)> {
        if let Some(absolute) = type_name.strip_prefix('.') {
            return self.types.get(absolute).map(|entry| (absolute.to_string(), entry));
        }

        let mut scope = Some(scope);
        while let Some(current) = scope {
            let candidate = qualify(current, type_name);
            if let Some(entry) = self.types.get(&candidate) {
                return Some((candidate, entry));
            }

            scope = match current.rfind('.') {
                Some(dot) => Some(&current[..dot]),
                None if !current.is_empty() => Some(""),
                None => None,
            };
        }

        None
    }

    /// Records, for `message` and everything nested in it, the messages it
    /// holds by value: singular message fields and oneof alternatives.
    /// Repeated fields live behind a `Vec` and break the chain.
    fn embeddings(&self, scope: &str, message: &MessageDescriptor, graph: &mut EmbeddingGraph) {
        let full_name = qualify(scope, &message.name);

        let targets = message
            .fields
            .iter()
            .filter(|field| field.ty == FieldType::Message && field.label == Label::Singular)
            .filter_map(|field| {
                let type_name = field.type_name.as_deref()?;
                let (target, entry) = self.lookup(&full_name, type_name)?;
                (entry.kind == TypeKind::Message).then(|| (field.name.clone(), target))
            })
            .collect();

        graph.order.push(full_name.clone());
        graph.edges.insert(full_name.clone(), targets);

        for nested in message.nested_messages.iter() {
            self.embeddings(&full_name, nested, graph);
        }
    }
}

/// Which message holds which by value, through which field.
#[derive(Debug, Default)]
struct EmbeddingGraph {
    /// Declaration order, for stable error reporting.
    order: Vec<String>,
    edges: HashMap<String, Vec<(String, String)>>,
}

impl EmbeddingGraph {
    /// Rejects any cycle of messages holding each other by value, naming the
    /// field that closes it.
    fn check(&self) -> std::result::Result<(), SchemaError> {
        let mut done = HashSet::new();

        for message in self.order.iter() {
            let mut path = Vec::new();
            self.walk(message, &mut path, &mut done)?;
        }

        Ok(())
    }

    /// Depth-first walk; `path` holds the chain from the starting message.
    fn walk<'a>(
        &'a self,
        message: &'a str,
        path: &mut Vec<&'a str>,
        done: &mut HashSet<&'a str>,
    ) -> std::result::Result<(), SchemaError> {
        if done.contains(message) {
            return Ok(());
        }
        path.push(message);

        for (field, target) in self.edges.get(message).into_iter().flatten() {
            if path.contains(&target.as_str()) {
                return Err(SchemaError::RecursiveField {
                    message: message.to_string(),
                    field: field.clone(),
                });
            }
            self.walk(target, path, done)?;
        }

        path.pop();
        done.insert(message);
        Ok(())
    }
}

/// Resolves references from code emitted in `module`, for fields declared
/// on the message `scope`.
struct ScopedResolver<'a> {
    registry: &'a TypeRegistry,
    scope: &'a str,
    module: &'a [Ident],
}

impl ResolveType for ScopedResolver<'_> {
    fn resolve(
        &self,
        message: &str,
        field: &FieldDescriptor,
    ) -> std::result::Result<Option<TokenStream>, SchemaError> {
        let (Some(type_name), Some(expected)) = (&field.type_name, field.ty.kind()) else {
            return Ok(None);
        };

        let unresolved = || SchemaError::UnresolvedType {
            message: message.to_string(),
            field: field.name.clone(),
            type_name: type_name.clone(),
        };
        let (_, entry) = self
            .registry
            .lookup(self.scope, type_name)
            .ok_or_else(unresolved)?;

        if entry.kind != expected {
            return Err(SchemaError::TypeKindMismatch {
                message: message.to_string(),
                field: field.name.clone(),
                type_name: type_name.clone(),
                expected,
            });
        }

        Ok(Some(relative_path(self.module, entry)))
    }
}

/// Path to `entry` from code sitting in `from`.
fn relative_path(from: &[Ident], entry: &TypeEntry) -> TokenStream {
    let common = from
        .iter()
        .zip(entry.module.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let supers = (common..from.len()).map(|_| quote!(super::));
    let modules = entry.module[common..].iter();
    let ident = &entry.ident;

    quote!(#(#supers)* #(#modules::)* #ident)
}

/// Module path a file of `package` is included under.
fn package_module(package: &str) -> Vec<Ident> {
    package
        .split('.')
        .filter(|segment| !segment.is_empty())
        .map(naming::module_ident)
        .collect()
}

/// Whether the message gets a module for its nested declarations.
fn has_module(message: &MessageDescriptor) -> bool {
    !message.nested_enums.is_empty()
        || !message.nested_messages.is_empty()
        || !message.oneofs.is_empty()
}

struct FileGenerator<'a> {
    registry: &'a TypeRegistry,
    emitter: &'a Emitter,
}

impl FileGenerator<'_> {
    fn file(&self, file: &FileDescriptor) -> Result<String> {
        log::debug!("generating {} ({} messages)", file.name, file.messages.len());

        let mut items = Vec::new();
        for e in file.enums.iter() {
            items.push(self.enumeration(&file.package, e)?);
        }
        let module = package_module(&file.package);
        for message in file.messages.iter() {
            items.push(self.message(&file.package, &module, message)?);
        }

        let mut content = format!(
            "// @generated by protoflat-gen from {}. Do not edit.\n",
            file.name
        );
        for item in items {
            content.push('\n');
            content.push_str(&item.to_string());
            content.push('\n');
        }

        Ok(content)
    }

    fn enumeration(&self, scope: &str, descriptor: &EnumDescriptor) -> Result<TokenStream> {
        let full_name = qualify(scope, &descriptor.name);
        log::debug!("mapping enum {}", full_name);

        let binding = mapper::map_enum(&full_name, descriptor)?;
        let def = self.emitter.enum_def(&binding);
        let imp = self.emitter.enum_impl(&binding);

        Ok(quote!(#def #imp))
    }

    fn message(
        &self,
        scope: &str,
        module: &[Ident],
        descriptor: &MessageDescriptor,
    ) -> Result<TokenStream> {
        let full_name = qualify(scope, &descriptor.name);
        log::debug!("mapping message {}", full_name);

        let module_ident = naming::module_ident(&descriptor.name);
        let mut inner = module.to_vec();
        inner.push(module_ident.clone());

        let member_resolver = ScopedResolver {
            registry: self.registry,
            scope: &full_name,
            module,
        };
        let alternative_resolver = ScopedResolver {
            registry: self.registry,
            scope: &full_name,
            module: &inner,
        };

        let mut members = descriptor
            .fields
            .iter()
            .filter(|field| field.oneof_index.is_none())
            .map(|field| {
                mapper::map_field(&full_name, field, naming::ident(&field.name), &member_resolver)
                    .map(Member::Field)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut oneofs = Vec::new();
        for (index, oneof) in descriptor.oneofs.iter().enumerate() {
            let alternatives = descriptor
                .fields
                .iter()
                .filter(|field| field.oneof_index == Some(index))
                .collect::<Vec<_>>();

            let enum_ident = naming::ident(&naming::pascal_case(&oneof.name));
            let binding = mapper::map_oneof(
                &full_name,
                &oneof.name,
                quote!(#module_ident::#enum_ident),
                &alternatives,
                &alternative_resolver,
            )?;

            oneofs.push(binding.clone());
            members.push(Member::Oneof(binding));
        }

        let binding = MessageBinding {
            name: full_name.clone(),
            ident: naming::ident(&descriptor.name),
            members,
        };
        mapper::check_unique_numbers(&binding)?;

        let mut nested = Vec::new();
        for e in descriptor.nested_enums.iter() {
            nested.push(self.enumeration(&full_name, e)?);
        }
        for message in descriptor.nested_messages.iter() {
            nested.push(self.message(&full_name, &inner, message)?);
        }
        for oneof in oneofs.iter() {
            nested.push(self.emitter.oneof_enum(oneof));
            nested.push(self.emitter.oneof_impl(oneof));
        }

        let def = self.emitter.message_struct(&binding);
        let imp = self.emitter.message_impl(&binding);
        let nested = match nested.is_empty() {
            true => quote!(),
            false => quote! {
                pub mod #module_ident {
                    #(#nested)*
                }
            },
        };

        Ok(quote!(#def #imp #nested))
    }
}
