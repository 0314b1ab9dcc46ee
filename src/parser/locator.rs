use url::Url;

use crate::backend::Instance;

/// 资源地址的上游改写（比如走实例代理），返回 None 视为地址缺失
pub trait LocatorTransform: Send + Sync {
    fn transform(&self, raw: &str) -> Option<Url>;
}

// 原样解析
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectLocator;

impl LocatorTransform for DirectLocator {
    fn transform(&self, raw: &str) -> Option<Url> {
        Url::parse(raw.trim()).ok()
    }
}

// 把资源地址的协议、主机、端口换成实例自己的
#[derive(Debug, Clone)]
pub struct InstanceProxy {
    base: Url,
    enabled: bool,
}

impl InstanceProxy {
    pub fn new(base: Url, enabled: bool) -> Self {
        Self { base, enabled }
    }

    pub fn for_instance(instance: &Instance) -> Self {
        Self::new(instance.api_url.clone(), instance.proxies_videos)
    }
}

impl LocatorTransform for InstanceProxy {
    fn transform(&self, raw: &str) -> Option<Url> {
        let mut url = Url::parse(raw.trim()).ok()?;
        if !self.enabled {
            return Some(url);
        }

        url.set_scheme(self.base.scheme()).ok()?;
        url.set_host(self.base.host_str()).ok()?;
        url.set_port(self.base.port()).ok()?;
        Some(url)
    }
}

impl<T: LocatorTransform + ?Sized> LocatorTransform for Box<T> {
    fn transform(&self, raw: &str) -> Option<Url> {
        (**self).transform(raw)
    }
}
