use crate::macros::error::single_generic;
use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Type};

/// How a struct field takes part in reflection.
enum Role {
    /// Scalars, strings, enums, references and sequences of those (via `AsField`).
    Plain { sequence: bool },
    Record(RecordShape),
    Embedded,
    /// The object's own reference; kept out of the descriptor.
    SelfReference,
}

#[derive(Clone, Copy)]
enum RecordShape {
    Single,
    Optional,
    Many,
}

struct ReflectField {
    member: Ident,
    /// Internal upper-camel name.
    name: String,
    /// Embedded without a rename: the name is the base's described type name.
    named_by_type: bool,
    ty: Type,
    role: Role,
}

struct ReflectStruct {
    ident: Ident,
    type_name: String,
    fields: Vec<ReflectField>,
}

pub fn expand_reflect(input: DeriveInput) -> TokenStream {
    match ReflectStruct::parse(&input) {
        Ok(model) => model.reflect_impl(),
        Err(err) => err.to_compile_error(),
    }
}

pub fn expand_managed_object(input: DeriveInput) -> TokenStream {
    match ReflectStruct::parse(&input).and_then(|model| model.managed_object_impl()) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

impl ReflectStruct {
    fn parse(input: &DeriveInput) -> syn::Result<Self> {
        let Data::Struct(data) = &input.data else {
            return Err(syn::Error::new_spanned(&input.ident, "Reflect can only be derived for structs"));
        };
        let Fields::Named(named) = &data.fields else {
            return Err(syn::Error::new_spanned(&input.ident, "Reflect requires named fields"));
        };
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(&input.generics, "Reflect does not support generic types"));
        }

        let mut type_name = input.ident.to_string();
        for attr in input.attrs.iter().filter(|a| a.path().is_ident("reflect")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type_name") {
                    type_name = meta.value()?.parse::<LitStr>()?.value();
                    Ok(())
                } else {
                    Err(meta.error("unsupported reflect attribute"))
                }
            })?;
        }

        let mut fields = Vec::new();
        for field in &named.named {
            let Some(member) = field.ident.clone() else { continue };
            if let Some(parsed) = ReflectField::parse(member, field)? {
                fields.push(parsed);
            }
        }

        let references = fields.iter().filter(|f| matches!(f.role, Role::SelfReference)).count();
        if references > 1 {
            return Err(syn::Error::new_spanned(&input.ident, "at most one field may be #[reflect(reference)]"));
        }

        Ok(Self { ident: input.ident.clone(), type_name, fields })
    }

    fn described(&self) -> impl Iterator<Item = &ReflectField> {
        self.fields.iter().filter(|f| !matches!(f.role, Role::SelfReference))
    }

    fn reflect_impl(&self) -> TokenStream {
        let ident = &self.ident;
        let type_name = &self.type_name;
        let descriptors = self.described().map(ReflectField::descriptor);
        let arms = self.described().map(ReflectField::lookup_arm);

        quote! {
            #[automatically_derived]
            impl ::vsim_domain::reflect::Describe for #ident {
                const DESCRIPTOR: &'static ::vsim_domain::reflect::TypeDescriptor = &::vsim_domain::reflect::TypeDescriptor {
                    name: #type_name,
                    fields: &[#(#descriptors),*],
                };
            }

            #[automatically_derived]
            impl ::vsim_domain::reflect::Reflect for #ident {
                fn descriptor(&self) -> &'static ::vsim_domain::reflect::TypeDescriptor {
                    <Self as ::vsim_domain::reflect::Describe>::DESCRIPTOR
                }

                fn field(&self, name: &str) -> ::core::option::Option<::vsim_domain::reflect::Field<'_>> {
                    match name {
                        #(#arms)*
                        _ => ::core::option::Option::None,
                    }
                }
            }
        }
    }

    fn managed_object_impl(&self) -> syn::Result<TokenStream> {
        let ident = &self.ident;

        let (get, get_mut) = if let Some(own) = self.fields.iter().find(|f| matches!(f.role, Role::SelfReference)) {
            let member = &own.member;
            (quote! { &self.#member }, quote! { &mut self.#member })
        } else if let Some(base) = self.fields.iter().find(|f| matches!(f.role, Role::Embedded)) {
            let member = &base.member;
            (
                quote! { ::vsim_domain::reflect::ManagedObject::reference(&self.#member) },
                quote! { ::vsim_domain::reflect::ManagedObject::reference_mut(&mut self.#member) },
            )
        } else {
            return Err(syn::Error::new_spanned(
                ident,
                "ManagedObject needs a #[reflect(reference)] field or an #[reflect(embed)] base",
            ));
        };

        Ok(quote! {
            #[automatically_derived]
            impl ::vsim_domain::reflect::ManagedObject for #ident {
                fn reference(&self) -> &::vsim_domain::ManagedObjectReference {
                    #get
                }

                fn reference_mut(&mut self) -> &mut ::vsim_domain::ManagedObjectReference {
                    #get_mut
                }

                fn as_any(&self) -> &dyn ::core::any::Any {
                    self
                }

                fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                    self
                }
            }
        })
    }
}

impl ReflectField {
    fn parse(member: Ident, field: &syn::Field) -> syn::Result<Option<Self>> {
        let mut rename = None;
        let mut embed = false;
        let mut record = false;
        let mut reference = false;
        let mut skip = false;

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("reflect")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("embed") {
                    embed = true;
                } else if meta.path.is_ident("record") {
                    record = true;
                } else if meta.path.is_ident("reference") {
                    reference = true;
                } else if meta.path.is_ident("skip") {
                    skip = true;
                } else if meta.path.is_ident("rename") {
                    rename = Some(meta.value()?.parse::<LitStr>()?.value());
                } else {
                    return Err(meta.error("unsupported reflect attribute"));
                }
                Ok(())
            })?;
        }

        if skip {
            return Ok(None);
        }
        if [embed, record, reference].into_iter().filter(|set| *set).count() > 1 {
            return Err(syn::Error::new_spanned(&member, "embed, record and reference are mutually exclusive"));
        }

        let ty = field.ty.clone();
        let role = if reference {
            Role::SelfReference
        } else if embed {
            Role::Embedded
        } else if record {
            Role::Record(if single_generic(&ty, "Option").is_some() {
                RecordShape::Optional
            } else if single_generic(&ty, "Vec").is_some() {
                RecordShape::Many
            } else {
                RecordShape::Single
            })
        } else {
            Role::Plain { sequence: single_generic(&ty, "Vec").is_some() }
        };

        let named_by_type = matches!(role, Role::Embedded) && rename.is_none();
        let name = match (&role, rename) {
            (_, Some(rename)) => upper_first(&rename),
            (Role::Embedded, None) => last_segment(&ty).unwrap_or_else(|| upper_camel(&member.unraw().to_string())),
            (_, None) => upper_camel(&member.unraw().to_string()),
        };

        Ok(Some(Self { member, name, named_by_type, ty, role }))
    }

    /// Element record type for record fields.
    fn record_type(&self) -> &Type {
        match self.role {
            Role::Record(RecordShape::Optional) => single_generic(&self.ty, "Option").unwrap_or(&self.ty),
            Role::Record(RecordShape::Many) => single_generic(&self.ty, "Vec").unwrap_or(&self.ty),
            _ => &self.ty,
        }
    }

    /// The field name as a constant expression.
    fn name_tokens(&self) -> TokenStream {
        if self.named_by_type {
            let ty = &self.ty;
            quote! { <#ty as ::vsim_domain::reflect::Describe>::DESCRIPTOR.name }
        } else {
            LitStr::new(&self.name, Span::call_site()).to_token_stream()
        }
    }

    fn descriptor(&self) -> TokenStream {
        let name = self.name_tokens();
        let kind = match &self.role {
            Role::Plain { sequence: false } | Role::SelfReference => quote! { ::vsim_domain::reflect::FieldKind::Value },
            Role::Plain { sequence: true } => quote! { ::vsim_domain::reflect::FieldKind::Sequence },
            Role::Record(_) => {
                let inner = self.record_type();
                quote! {
                    ::vsim_domain::reflect::FieldKind::Record(
                        <#inner as ::vsim_domain::reflect::Describe>::DESCRIPTOR.name
                    )
                }
            },
            Role::Embedded => {
                let ty = &self.ty;
                quote! {
                    ::vsim_domain::reflect::FieldKind::Embedded(<#ty as ::vsim_domain::reflect::Describe>::DESCRIPTOR)
                }
            },
        };

        quote! { ::vsim_domain::reflect::FieldDescriptor { name: #name, kind: #kind } }
    }

    fn lookup_arm(&self) -> TokenStream {
        let member = &self.member;
        let value = match &self.role {
            Role::Plain { .. } | Role::SelfReference => {
                quote! { ::vsim_domain::reflect::AsField::as_field(&self.#member) }
            },
            Role::Embedded => quote! { ::vsim_domain::reflect::Field::Embedded(&self.#member) },
            Role::Record(RecordShape::Single) => quote! { ::vsim_domain::reflect::Field::Record(&self.#member) },
            Role::Record(RecordShape::Optional) => quote! {
                ::vsim_domain::reflect::Field::OptionalRecord(
                    self.#member.as_ref().map(|r| r as &dyn ::vsim_domain::reflect::Reflect)
                )
            },
            Role::Record(RecordShape::Many) => {
                let inner = self.record_type().to_token_stream();
                quote! {
                    ::vsim_domain::reflect::Field::Records {
                        element: <#inner as ::vsim_domain::reflect::Describe>::DESCRIPTOR.name,
                        items: self.#member.iter().map(|r| r as &dyn ::vsim_domain::reflect::Reflect).collect(),
                    }
                }
            },
        };

        if self.named_by_type {
            let name = self.name_tokens();
            quote! { other if other == #name => ::core::option::Option::Some(#value), }
        } else {
            let name = LitStr::new(&self.name, Span::call_site());
            quote! { #name => ::core::option::Option::Some(#value), }
        }
    }
}

fn last_segment(ty: &Type) -> Option<String> {
    let Type::Path(path) = ty else {
        return None;
    };
    path.path.segments.last().map(|s| s.ident.to_string())
}

/// `overall_status` → `OverallStatus`.
fn upper_camel(snake: &str) -> String {
    snake
        .split('_')
        .filter(|part| !part.is_empty())
        .map(upper_first)
        .collect()
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_camel() {
        assert_eq!(upper_camel("overall_status"), "OverallStatus");
        assert_eq!(upper_camel("name"), "Name");
        assert_eq!(upper_camel("num_cpu"), "NumCpu");
        assert_eq!(upper_first("memoryMB"), "MemoryMB");
    }

    #[test]
    fn test_record_shapes_are_detected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Machine {
                #[reflect(reference)]
                self_ref: ManagedObjectReference,
                name: String,
                host: Vec<ManagedObjectReference>,
                #[reflect(record)]
                config: Option<ConfigInfo>,
                #[reflect(record)]
                extra_config: Vec<OptionValue>,
                #[reflect(rename = "memoryMB")]
                memory_mb: i32,
                #[reflect(skip)]
                scratch: u8,
            }
        };

        let model = ReflectStruct::parse(&input).unwrap();
        let names: Vec<_> = model.described().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Name", "Host", "Config", "ExtraConfig", "MemoryMB"]);
        assert!(matches!(model.fields[2].role, Role::Plain { sequence: true }));
        assert!(matches!(model.fields[3].role, Role::Record(RecordShape::Optional)));
        assert!(matches!(model.fields[4].role, Role::Record(RecordShape::Many)));
    }

    #[test]
    fn test_embedded_field_takes_base_type_name() {
        let input: DeriveInput = syn::parse_quote! {
            struct Folder {
                #[reflect(embed)]
                entity: ManagedEntity,
            }
        };

        let model = ReflectStruct::parse(&input).unwrap();
        assert_eq!(model.fields[0].name, "ManagedEntity");
        assert!(model.fields[0].named_by_type);
        assert!(model.managed_object_impl().is_ok());
    }

    #[test]
    fn test_managed_object_without_reference_is_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Loose { name: String }
        };

        let model = ReflectStruct::parse(&input).unwrap();
        assert!(model.managed_object_impl().is_err());
    }

    #[test]
    fn test_type_name_override() {
        let input: DeriveInput = syn::parse_quote! {
            #[reflect(type_name = "HostRuntimeInfo")]
            struct HostRuntime { connected: bool }
        };

        assert_eq!(ReflectStruct::parse(&input).unwrap().type_name, "HostRuntimeInfo");
    }
}
