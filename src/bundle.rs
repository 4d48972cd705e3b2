//! 聚合模块：
//! - 并发转换所有图标（作用域线程 + 通道，按发现顺序回收）
//! - 拼接固定的类型声明头与所有组件，渲染模板并格式化
//! - 直接返回导出的标识符列表，供测试生成器使用

use std::{num::NonZeroUsize, sync::mpsc, thread};

use tera::{Context as TContext, Tera};

use crate::{
    config::ConvertSettings,
    error::{GenError, Result},
    format::{format_source, FormatOptions},
    select::Icon,
    svg::{svg_to_component, ConvertOptions},
    templates::MODULE_TEMPLATE,
    transform::{rewrite_component, GeneratedComponent},
};

/// 格式化后的模块文本 + 按文本顺序排列的导出名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub source: String,
    pub identifiers: Vec<String>,
}

/// 单个图标：转换 -> 改写
pub fn generate_component(icon: &Icon, settings: &ConvertSettings) -> Result<GeneratedComponent> {
    let opts = ConvertOptions::for_icon(&icon.name, settings);
    let converted = svg_to_component(&icon.content, &opts).map_err(|source| GenError::Convert {
        name: icon.name.clone(),
        source,
    })?;
    rewrite_component(&converted, &icon.name).map_err(|source| GenError::Shape {
        name: icon.name.clone(),
        source,
    })
}

/// 并发生成所有组件；全部完成后按发现顺序返回，任一失败则整体失败
pub fn generate_components(
    icons: &[Icon],
    settings: &ConvertSettings,
) -> Result<Vec<GeneratedComponent>> {
    if icons.is_empty() {
        return Ok(Vec::new());
    }
    let total = icons.len();
    let workers = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(4)
        .min(total);
    let chunk_size = total.div_ceil(workers);

    let (tx, rx) = mpsc::channel::<(usize, Result<GeneratedComponent>)>();
    thread::scope(|scope| {
        for (chunk_idx, chunk) in icons.chunks(chunk_size).enumerate() {
            let tx = tx.clone();
            scope.spawn(move || {
                for (offset, icon) in chunk.iter().enumerate() {
                    let res = generate_component(icon, settings);
                    let _ = tx.send((chunk_idx * chunk_size + offset, res));
                }
            });
        }
    });
    drop(tx);

    // 作用域结束时所有线程均已退出（panic 会直接向上传播），每个位置都已填充
    let mut slots: Vec<Option<Result<GeneratedComponent>>> = (0..total).map(|_| None).collect();
    for (idx, res) in rx {
        slots[idx] = Some(res);
    }
    let components = slots.into_iter().flatten().collect::<Result<Vec<_>>>()?;
    for (component, icon) in components.iter().zip(icons) {
        tracing::debug!("✅ 已生成组件: {} <- {}", component.name, icon.path.display());
    }
    Ok(components)
}

/// 渲染 `icons.ts` 模板并格式化
pub fn assemble(
    tera: &Tera,
    components: &[GeneratedComponent],
    style: &FormatOptions,
) -> Result<Bundle> {
    let mut ctx = TContext::new();
    let sources: Vec<&str> = components.iter().map(|c| c.source.as_str()).collect();
    ctx.insert("components", &sources);
    let raw = tera.render(MODULE_TEMPLATE, &ctx)?;
    let source = format_source(&raw, style)?;
    Ok(Bundle {
        source,
        identifiers: components.iter().map(|c| c.name.clone()).collect(),
    })
}

/// 转换、改写、聚合、格式化
pub fn build_bundle(
    tera: &Tera,
    icons: &[Icon],
    settings: &ConvertSettings,
    style: &FormatOptions,
) -> Result<Bundle> {
    let components = generate_components(icons, settings)?;
    tracing::info!("🧩 已转换 {} 个图标", components.len());
    assemble(tera, &components, style)
}
