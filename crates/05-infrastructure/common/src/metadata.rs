//! 类型元数据定义
//!
//! 提供不依赖运行时反射的类型描述模型。类型目录中的每个条目都是一个
//! [`TypeDescriptor`]，记录类型的种类、基类、实现的接口以及泛型信息。

use crate::errors::{DiscoveryError, DiscoveryResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// 代码单元标识
///
/// 对应一个已编译的类型分组（通常是一个 crate），是类型扫描的边界。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeUnitId(String);

impl CodeUnitId {
    /// 创建新的代码单元标识
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// 获取代码单元名称
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 从完整类型路径中推导代码单元（取第一个路径段，不进入泛型参数）
    pub fn from_type_path(path: &str) -> Self {
        let path = path.trim_start_matches("dyn ");
        let outer = &path[..path.find('<').unwrap_or(path.len())];
        let end = outer.find("::").unwrap_or(outer.len());
        Self(outer[..end].to_string())
    }
}

impl fmt::Display for CodeUnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CodeUnitId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for CodeUnitId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// 类型种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// 接口（trait）
    Interface,
    /// 类（可实例化的引用类型）
    Class,
    /// 值类型结构体
    Struct,
    /// 枚举
    Enum,
    /// 基元类型
    Primitive,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Interface => "interface",
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Primitive => "primitive",
        };
        f.pad(name)
    }
}

#[derive(Debug)]
struct TypeData {
    name: String,
    code_unit: CodeUnitId,
    kind: TypeKind,
    is_abstract: bool,
    base: Option<TypeDescriptor>,
    interfaces: Vec<TypeDescriptor>,
    generic_arity: usize,
    is_generic_definition: bool,
    generic_definition: Option<TypeDescriptor>,
    generic_arguments: Vec<TypeDescriptor>,
}

/// 类型描述符
///
/// 已加载类型的不透明句柄，克隆开销为一次引用计数。
/// 两个描述符在代码单元和完整名称都相同时视为同一类型。
#[derive(Clone)]
pub struct TypeDescriptor(Arc<TypeData>);

impl TypeDescriptor {
    /// 开始构建接口描述符
    pub fn interface(name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder::new(name, TypeKind::Interface)
    }

    /// 开始构建类描述符
    pub fn class(name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder::new(name, TypeKind::Class)
    }

    /// 开始构建其他种类的描述符（结构体、枚举、基元类型）
    pub fn value(name: impl Into<String>, kind: TypeKind) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder::new(name, kind)
    }

    /// 以 Rust 类型构建类描述符
    pub fn class_of<T: 'static>() -> TypeDescriptorBuilder {
        Self::class(std::any::type_name::<T>())
    }

    /// 以 trait object 构建接口描述符
    pub fn interface_of<T: ?Sized + 'static>() -> TypeDescriptorBuilder {
        Self::interface(std::any::type_name::<T>().trim_start_matches("dyn "))
    }

    /// 以开放泛型定义和类型参数构建封闭泛型类型
    pub fn construct(
        definition: &TypeDescriptor,
        arguments: &[TypeDescriptor],
    ) -> DiscoveryResult<TypeDescriptorBuilder> {
        let expected = if definition.is_generic_type_definition() {
            definition.0.generic_arity
        } else {
            0
        };
        if expected == 0 || expected != arguments.len() {
            return Err(DiscoveryError::GenericArityMismatch {
                type_name: definition.name().to_string(),
                expected,
                actual: arguments.len(),
            });
        }

        let argument_names = arguments
            .iter()
            .map(TypeDescriptor::name)
            .collect::<Vec<_>>()
            .join(", ");

        let mut builder = TypeDescriptorBuilder::new(
            format!("{}<{}>", definition.name(), argument_names),
            definition.kind(),
        )
        .in_code_unit(definition.code_unit().clone());
        builder.data.is_abstract = definition.0.is_abstract;
        builder.data.generic_definition = Some(definition.clone());
        builder.data.generic_arguments = arguments.to_vec();
        Ok(builder)
    }

    /// 完整类型名称
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// 简短类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        let name = &self.0.name;
        let base_end = name.find('<').unwrap_or(name.len());
        let start = name[..base_end].rfind("::").map_or(0, |i| i + 2);
        &name[start..]
    }

    /// 所属代码单元
    pub fn code_unit(&self) -> &CodeUnitId {
        &self.0.code_unit
    }

    /// 类型种类
    pub fn kind(&self) -> TypeKind {
        self.0.kind
    }

    /// 是否为接口
    pub fn is_interface(&self) -> bool {
        self.0.kind == TypeKind::Interface
    }

    /// 是否为类
    pub fn is_class(&self) -> bool {
        self.0.kind == TypeKind::Class
    }

    /// 是否为抽象类型（接口总是抽象的）
    pub fn is_abstract(&self) -> bool {
        self.0.is_abstract
    }

    /// 基类型，根类型返回 `None`
    pub fn base_type(&self) -> Option<&TypeDescriptor> {
        self.0.base.as_ref()
    }

    /// 直接声明实现的接口，按声明顺序
    pub fn declared_interfaces(&self) -> &[TypeDescriptor] {
        &self.0.interfaces
    }

    /// 实现的全部接口
    ///
    /// 顺序为：声明的接口（每个接口后紧跟它继承的接口），然后是从基类链继承的接口。
    /// 重复的接口只保留第一次出现的位置。
    pub fn interfaces(&self) -> Vec<TypeDescriptor> {
        let mut interfaces = Vec::new();
        self.collect_interfaces(&mut interfaces);
        interfaces
    }

    fn collect_interfaces(&self, out: &mut Vec<TypeDescriptor>) {
        for interface in &self.0.interfaces {
            if !out.contains(interface) {
                out.push(interface.clone());
                interface.collect_interfaces(out);
            }
        }
        if let Some(base) = &self.0.base {
            base.collect_interfaces(out);
        }
    }

    /// 基类链，从直接基类开始
    pub fn ancestors(&self) -> impl Iterator<Item = &TypeDescriptor> {
        std::iter::successors(self.base_type(), |t| t.base_type())
    }

    /// 是否为泛型类型（开放定义或封闭构造）
    pub fn is_generic_type(&self) -> bool {
        self.0.is_generic_definition || self.0.generic_definition.is_some()
    }

    /// 是否为开放泛型定义
    pub fn is_generic_type_definition(&self) -> bool {
        self.0.is_generic_definition
    }

    /// 泛型定义：开放定义返回自身，封闭构造返回其定义，非泛型类型返回 `None`
    pub fn generic_type_definition(&self) -> Option<TypeDescriptor> {
        if self.0.is_generic_definition {
            Some(self.clone())
        } else {
            self.0.generic_definition.clone()
        }
    }

    /// 封闭泛型的类型参数
    pub fn generic_arguments(&self) -> &[TypeDescriptor] {
        &self.0.generic_arguments
    }

    /// `other` 的实例是否可以赋值给当前类型
    ///
    /// 覆盖自身、接口实现（含接口继承）以及基类继承，均为传递关系。
    pub fn is_assignable_from(&self, other: &TypeDescriptor) -> bool {
        if self == other {
            return true;
        }
        if self.is_interface() {
            return other.interfaces().contains(self);
        }
        other.ancestors().any(|ancestor| ancestor == self)
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.code_unit == other.0.code_unit && self.0.name == other.0.name)
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.code_unit.hash(state);
        self.0.name.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescriptor({})", self.0.name)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

/// 类型描述符构建器
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    data: TypeData,
}

impl TypeDescriptorBuilder {
    fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        let name = name.into();
        Self {
            data: TypeData {
                code_unit: CodeUnitId::from_type_path(&name),
                name,
                kind,
                is_abstract: kind == TypeKind::Interface,
                base: None,
                interfaces: Vec::new(),
                generic_arity: 0,
                is_generic_definition: false,
                generic_definition: None,
                generic_arguments: Vec::new(),
            },
        }
    }

    /// 设置所属代码单元（默认取类型路径的第一段）
    pub fn in_code_unit(mut self, code_unit: impl Into<CodeUnitId>) -> Self {
        self.data.code_unit = code_unit.into();
        self
    }

    /// 标记为抽象类型
    pub fn abstract_type(mut self) -> Self {
        self.data.is_abstract = true;
        self
    }

    /// 设置基类
    pub fn extends(mut self, base: &TypeDescriptor) -> Self {
        self.data.base = Some(base.clone());
        self
    }

    /// 添加实现的接口
    pub fn implements(mut self, interface: &TypeDescriptor) -> Self {
        self.data.interfaces.push(interface.clone());
        self
    }

    /// 标记为具有 `arity` 个类型参数的开放泛型定义
    pub fn generic_definition(mut self, arity: usize) -> Self {
        self.data.is_generic_definition = arity > 0;
        self.data.generic_arity = arity;
        self
    }

    /// 构建描述符
    pub fn build(mut self) -> TypeDescriptor {
        if self.data.kind == TypeKind::Interface {
            self.data.is_abstract = true;
        }
        TypeDescriptor(Arc::new(self.data))
    }
}
