//! 类型描述符
//!
//! 描述符是声明的载体：类型的种类、可见性、基类、实现的接口、
//! 自身的声明以及（对模块类型）创建模块实例的工厂。

use crate::declaration::{Declaration, DependencyDeclaration, ServiceDeclaration};
use crate::module::Module;
use infrastructure_common::{ModuleError, TypeKey};
use std::fmt;
use std::sync::Arc;

/// 模块工厂
pub type ModuleFactory = Arc<dyn Fn() -> Result<Box<dyn Module>, ModuleError> + Send + Sync>;

/// 类型种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// 具体类型
    Class,
    /// 接口（trait）
    Interface,
}

/// 类型可见性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// 公开类型
    Public,
    /// 仅在定义单元内部可见
    Internal,
}

/// 类型描述符
#[derive(Clone)]
pub struct TypeDescriptor {
    key: TypeKey,
    kind: TypeKind,
    is_abstract: bool,
    visibility: Visibility,
    base: Option<TypeKey>,
    interfaces: Vec<TypeKey>,
    declarations: Vec<Declaration>,
    module_factory: Option<ModuleFactory>,
}

impl TypeDescriptor {
    /// 创建具体类型的描述符
    pub fn class<T: ?Sized + 'static>() -> Self {
        Self::with_key(TypeKey::of::<T>(), TypeKind::Class)
    }

    /// 创建接口的描述符
    pub fn interface<T: ?Sized + 'static>() -> Self {
        Self::with_key(TypeKey::of::<T>(), TypeKind::Interface)
    }

    /// 使用已有类型标识创建描述符
    pub fn with_key(key: TypeKey, kind: TypeKind) -> Self {
        Self {
            key,
            kind,
            is_abstract: false,
            visibility: Visibility::Public,
            base: None,
            interfaces: Vec::new(),
            declarations: Vec::new(),
            module_factory: None,
        }
    }

    /// 标记为抽象类型
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// 设置可见性
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// 标记为内部类型
    pub fn internal(self) -> Self {
        self.visibility(Visibility::Internal)
    }

    /// 设置基类
    pub fn extends<B: ?Sized + 'static>(self) -> Self {
        self.extends_key(TypeKey::of::<B>())
    }

    /// 使用类型标识设置基类
    pub fn extends_key(mut self, base: TypeKey) -> Self {
        self.base = Some(base);
        self
    }

    /// 添加实现的接口
    pub fn implements<I: ?Sized + 'static>(self) -> Self {
        self.implements_key(TypeKey::of::<I>())
    }

    /// 使用类型标识添加实现的接口
    pub fn implements_key(mut self, interface: TypeKey) -> Self {
        if !self.interfaces.contains(&interface) {
            self.interfaces.push(interface);
        }
        self
    }

    /// 添加声明
    pub fn declare(mut self, declaration: impl Into<Declaration>) -> Self {
        self.declarations.push(declaration.into());
        self
    }

    /// 添加服务声明
    pub fn service(self, declaration: ServiceDeclaration) -> Self {
        self.declare(declaration)
    }

    /// 添加依赖声明
    pub fn depends_on(self, depended_types: impl IntoIterator<Item = TypeKey>) -> Self {
        self.declare(DependencyDeclaration::new(depended_types))
    }

    /// 声明为模块，使用 `Default` 创建实例
    pub fn module<M>(self) -> Self
    where
        M: Module + Default + 'static,
    {
        self.module_factory(|| Ok(Box::new(M::default()) as Box<dyn Module>))
    }

    /// 声明为模块，使用自定义工厂创建实例
    pub fn module_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn Module>, ModuleError> + Send + Sync + 'static,
    {
        self.module_factory = Some(Arc::new(factory));
        self
    }

    /// 类型标识
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// 类型种类
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// 是否为抽象类型
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// 是否为公开类型
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// 基类
    pub fn base(&self) -> Option<TypeKey> {
        self.base
    }

    /// 自身声明实现的接口
    pub fn interfaces(&self) -> &[TypeKey] {
        &self.interfaces
    }

    /// 自身的声明
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// 模块工厂
    pub fn factory(&self) -> Option<&ModuleFactory> {
        self.module_factory.as_ref()
    }

    /// 是否为模块类型
    pub fn is_module(&self) -> bool {
        self.module_factory.is_some()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("is_abstract", &self.is_abstract)
            .field("visibility", &self.visibility)
            .field("base", &self.base)
            .field("interfaces", &self.interfaces)
            .field("declarations", &self.declarations)
            .field("is_module", &self.is_module())
            .finish()
    }
}

/// 可描述类型
///
/// 通常由 `#[derive(Injectable)]` 生成。
pub trait Describe: 'static {
    /// 生成类型描述符
    fn describe() -> TypeDescriptor;

    /// 类型标识
    fn type_key() -> TypeKey {
        TypeKey::of::<Self>()
    }
}
