//! 注册声明定义
//!
//! 声明附加在类型上，描述该类型是否作为服务注册以及依赖哪些模块类型。

use infrastructure_common::{Lifetime, TypeKey};

/// 服务声明
///
/// 不带参数的声明默认为 `Singleton`；指定服务类型但未指定生命周期时默认为 `Transient`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDeclaration {
    /// 显式服务类型，为空时按接口匹配规则推断
    pub service_type: Option<TypeKey>,
    /// 生命周期
    pub lifetime: Lifetime,
    /// 是否显式排除自动注册
    pub ignored: bool,
}

impl Default for ServiceDeclaration {
    fn default() -> Self {
        Self::singleton()
    }
}

impl ServiceDeclaration {
    /// 创建指定生命周期的服务声明
    pub fn new(lifetime: Lifetime) -> Self {
        Self {
            service_type: None,
            lifetime,
            ignored: false,
        }
    }

    /// 单例服务声明
    pub fn singleton() -> Self {
        Self::new(Lifetime::Singleton)
    }

    /// 作用域服务声明
    pub fn scoped() -> Self {
        Self::new(Lifetime::Scoped)
    }

    /// 瞬时服务声明
    pub fn transient() -> Self {
        Self::new(Lifetime::Transient)
    }

    /// 指定服务类型的声明，生命周期为 `Transient`
    pub fn for_service(service_type: TypeKey) -> Self {
        Self::transient().with_service(service_type)
    }

    /// 被排除的声明
    pub fn ignored() -> Self {
        Self {
            ignored: true,
            ..Self::singleton()
        }
    }

    /// 设置服务类型
    pub fn with_service(mut self, service_type: TypeKey) -> Self {
        self.service_type = Some(service_type);
        self
    }

    /// 设置生命周期
    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = lifetime;
        self
    }
}

/// 依赖声明
///
/// 被依赖类型所在的定义单元会在当前类型之后被扫描。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyDeclaration {
    /// 被依赖类型，保持声明顺序
    pub depended_types: Vec<TypeKey>,
}

impl DependencyDeclaration {
    /// 创建依赖声明
    pub fn new(depended_types: impl IntoIterator<Item = TypeKey>) -> Self {
        Self {
            depended_types: depended_types.into_iter().collect(),
        }
    }

    /// 合并多个依赖声明，去除重复类型并保留首次出现的位置
    pub fn merge<'a>(
        declarations: impl IntoIterator<Item = &'a DependencyDeclaration>,
    ) -> Option<Self> {
        let mut merged: Option<Self> = None;
        for declaration in declarations {
            let target = merged.get_or_insert_with(Self::default);
            for ty in &declaration.depended_types {
                if !target.depended_types.contains(ty) {
                    target.depended_types.push(*ty);
                }
            }
        }
        merged
    }
}

/// 类型上的一条声明
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// 服务声明
    Service(ServiceDeclaration),
    /// 依赖声明
    DependsOn(DependencyDeclaration),
}

impl Declaration {
    /// 作为服务声明
    pub fn as_service(&self) -> Option<&ServiceDeclaration> {
        match self {
            Self::Service(declaration) => Some(declaration),
            Self::DependsOn(_) => None,
        }
    }

    /// 作为依赖声明
    pub fn as_dependency(&self) -> Option<&DependencyDeclaration> {
        match self {
            Self::DependsOn(declaration) => Some(declaration),
            Self::Service(_) => None,
        }
    }
}

impl From<ServiceDeclaration> for Declaration {
    fn from(declaration: ServiceDeclaration) -> Self {
        Self::Service(declaration)
    }
}

impl From<DependencyDeclaration> for Declaration {
    fn from(declaration: DependencyDeclaration) -> Self {
        Self::DependsOn(declaration)
    }
}
