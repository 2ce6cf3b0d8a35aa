//! Catalogue of common treatment side effects with nursing guidance.
//!
//! Labels recorded on timeline events key into this fixed catalogue.

/// Nursing strategies and medication suggestions for one known side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideEffectDetail {
    /// Nursing / lifestyle advice
    pub strategies: &'static [&'static str],
    /// Suggested medications
    pub medications: &'static [&'static str],
}

/// The fixed catalogue, keyed by display label.
pub const COMMON_SIDE_EFFECTS: &[(&str, SideEffectDetail)] = &[
    (
        "恶心呕吐 (CINV)",
        SideEffectDetail {
            strategies: &[
                "少量多餐，避免空腹或过饱。",
                "避免油腻、辛辣、气味强烈的食物。",
                "餐后坐立30分钟，避免立即躺下。",
                "尝试含服生姜片或饮用姜茶。",
                "保持环境通风，减少异味刺激。",
            ],
            medications: &[
                "5-HT3受体拮抗剂：昂丹司琼 (Ondansetron)、格拉司琼 (Granisetron)",
                "NK-1受体拮抗剂：阿瑞匹坦 (Aprepitant)",
                "皮质类固醇：地塞米松 (Dexamethasone)",
                "多巴胺受体拮抗剂：甲氧氯普胺 (胃复安)",
                "非典型抗精神病药：奥氮平 (Olanzapine)",
            ],
        },
    ),
    (
        "骨髓抑制 (白细胞/中性粒减少)",
        SideEffectDetail {
            strategies: &[
                "严格佩戴口罩，避免前往人群密集场所。",
                "注意个人卫生，勤洗手，每日监测体温。",
                "避免进食生冷、未煮熟的食物 (如生鱼片、沙拉)。",
                "保持口腔清洁，使用软毛牙刷。",
            ],
            medications: &[
                "短效升白针：G-CSF (瑞白/惠尔血)",
                "长效升白针：PEG-rhG-CSF (津优力/新瑞白)",
                "抗生素：仅在合并发热或感染风险高时使用 (如头孢类、喹诺酮类)",
            ],
        },
    ),
    (
        "贫血",
        SideEffectDetail {
            strategies: &[
                "增加富含铁质食物摄入 (红肉、菠菜、动物肝脏)。",
                "起身动作缓慢，防止直立性低血压。",
                "保证充足休息，避免剧烈运动。",
            ],
            medications: &[
                "促红细胞生成素 (EPO)",
                "铁剂：琥珀酸亚铁、右旋糖酐铁",
                "严重时 (Hb < 60g/L) 考虑输注红细胞悬液",
            ],
        },
    ),
    (
        "血小板减少",
        SideEffectDetail {
            strategies: &[
                "避免磕碰、外伤，使用软毛牙刷。",
                "避免用力擤鼻涕，避免便秘 (用力排便)。",
                "观察有无牙龈出血、皮下瘀斑。",
            ],
            medications: &[
                "重组人血小板生成素 (TPO)",
                "白介素-11 (IL-11)",
                "严重出血风险时输注血小板",
            ],
        },
    ),
    (
        "脱发",
        SideEffectDetail {
            strategies: &[
                "化疗期间使用冰帽 (头皮冷却) 可减少脱发。",
                "剪短发以减少牵拉，使用温和洗发水。",
                "外出佩戴帽子或头巾注意防晒保暖。",
                "心理辅导：告知患者停药后头发会重新生长。",
            ],
            medications: &["目前无特效药物治疗化疗性脱发，主要依靠物理防护。"],
        },
    ),
    (
        "手足综合征 (HFS)",
        SideEffectDetail {
            strategies: &[
                "避免接触热水，洗手洗脚用温水。",
                "避免手足摩擦 (如长时间走路、做家务)。",
                "穿着宽松舒适的鞋袜。",
                "每日多次涂抹保湿霜/尿素霜。",
            ],
            medications: &[
                "外用：尿素霜、维生素E乳膏",
                "严重时：局部皮质类固醇药膏",
                "口服：维生素B6 (部分研究支持)",
            ],
        },
    ),
    (
        "腹泻",
        SideEffectDetail {
            strategies: &[
                "每日饮水 2000ml 以上，防脱水。",
                "进食低纤维、易消化食物 (如米粥、香蕉)。",
                "避免乳制品、咖啡因、酒精。",
                "注意肛周皮肤护理。",
            ],
            medications: &[
                "止泻药：洛哌丁胺 (易蒙停)",
                "生长抑素类似物：奥曲肽 (严重腹泻时)",
                "调节肠道菌群：益生菌制剂",
            ],
        },
    ),
    (
        "关节肌肉痛",
        SideEffectDetail {
            strategies: &[
                "适度热敷 (避免烫伤)。",
                "轻度拉伸和按摩。",
                "补充钙剂和维生素D (针对芳香化酶抑制剂引起的疼痛)。",
            ],
            medications: &[
                "非甾体抗炎药 (NSAIDs)：布洛芬、塞来昔布",
                "钙片 + 维生素D3",
                "严重时：弱阿片类镇痛药",
            ],
        },
    ),
    (
        "皮疹/过敏反应",
        SideEffectDetail {
            strategies: &[
                "保持皮肤清洁干燥，避免抓挠。",
                "穿着棉质宽松衣物。",
                "避免阳光直射，使用防晒霜。",
            ],
            medications: &[
                "外用：炉甘石洗剂、地塞米松软膏",
                "口服抗组胺药：氯雷他定、西替利嗪",
                "严重时：全身性激素治疗",
            ],
        },
    ),
    (
        "心脏毒性 (如曲妥珠单抗引起)",
        SideEffectDetail {
            strategies: &[
                "每3个月监测心脏超声 (LVEF)。",
                "控制血压、血脂、血糖。",
                "若出现心悸、气短、水肿需立即就医。",
            ],
            medications: &[
                "心脏保护剂：右雷佐生 (针对蒽环类)",
                "ACEI/ARB类药物 (如依那普利、缬沙坦)",
                "β受体阻滞剂 (如美托洛尔)",
            ],
        },
    ),
];

/// Look up the catalogue entry for a recorded label.
pub fn side_effect_detail(label: &str) -> Option<&'static SideEffectDetail> {
    COMMON_SIDE_EFFECTS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, detail)| detail)
}

/// All known side-effect labels, in catalogue order.
pub fn side_effect_labels() -> impl Iterator<Item = &'static str> {
    COMMON_SIDE_EFFECTS.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_label() {
        let detail = side_effect_detail("恶心呕吐 (CINV)").unwrap();
        assert_eq!(detail.strategies.len(), 5);
        assert!(detail.medications[0].contains("昂丹司琼"));
    }

    #[test]
    fn test_lookup_unknown_label() {
        assert!(side_effect_detail("不存在的副作用").is_none());
    }

    #[test]
    fn test_catalogue_is_complete() {
        assert_eq!(side_effect_labels().count(), 9);
        for (_, detail) in COMMON_SIDE_EFFECTS {
            assert!(!detail.strategies.is_empty());
            assert!(!detail.medications.is_empty());
        }
    }
}
