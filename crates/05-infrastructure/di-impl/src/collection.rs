//! 服务集合

use crate::loader::ServiceLoader;
use config_abstractions::ConfigurationSource;
use di_abstractions::{Binding, OptionsStore, ServiceRegistry, TypeCatalog};
use infrastructure_common::TypeKey;

/// 服务集合
///
/// [`ServiceRegistry`] 的内存实现，按注册顺序保存绑定。
#[derive(Debug, Default)]
pub struct ServiceCollection {
    bindings: Vec<Binding>,
    options: OptionsStore,
}

impl ServiceCollection {
    /// 创建空的服务集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 绑定数量
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// 遍历绑定
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    /// 指定服务类型的所有绑定
    pub fn bindings_for(&self, service_type: TypeKey) -> impl Iterator<Item = &Binding> {
        self.bindings
            .iter()
            .filter(move |binding| binding.service_type == service_type)
    }

    /// 指定实现类型的所有绑定
    pub fn bindings_of(&self, implementation_type: TypeKey) -> impl Iterator<Item = &Binding> {
        self.bindings
            .iter()
            .filter(move |binding| binding.implementation_type == implementation_type)
    }

    /// 使用一次性的扫描会话加载类型
    pub fn load_from(
        &mut self,
        catalog: &dyn TypeCatalog,
        types: &[TypeKey],
        configuration: Option<&dyn ConfigurationSource>,
    ) -> &mut Self {
        let mut loader = ServiceLoader::new(catalog);
        if let Some(configuration) = configuration {
            loader = loader.with_configuration(configuration);
        }
        loader.load_types(self, types);
        self
    }
}

impl ServiceRegistry for ServiceCollection {
    fn add(&mut self, binding: Binding) {
        self.bindings.push(binding);
    }

    fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    fn options(&self) -> &OptionsStore {
        &self.options
    }

    fn options_mut(&mut self) -> &mut OptionsStore {
        &mut self.options
    }
}

impl<'a> IntoIterator for &'a ServiceCollection {
    type Item = &'a Binding;
    type IntoIter = std::slice::Iter<'a, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}
