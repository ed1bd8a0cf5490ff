// Parametric Levenshtein tables for distances 1 and 2, with (`T`) and
// without transpositions. The `tables_match_construction` test in
// `parametric.rs` checks them against the position construction.

use super::parametric::{Packed, Tables};

pub(super) static LEV1: Tables = Tables {
    min_errors: &[
        0, 1, 0, -1, -1,
    ],
    to_states: &[
        Packed {
            bits: 2,
            data: &[
                0x0000000000000002,
            ],
        },
        Packed {
            bits: 2,
            data: &[
                0x00000000000AA403,
            ],
        },
        Packed {
            bits: 3,
            data: &[
                0x04DA292442420003,
            ],
        },
        Packed {
            bits: 3,
            data: &[
                0x14D0812112018003, 0x00B1A29B46D48A49,
            ],
        },
    ],
    offset_incrs: &[
        Packed {
            bits: 1,
            data: &[
                0x0000000000000000,
            ],
        },
        Packed {
            bits: 1,
            data: &[
                0x00000000000003E0,
            ],
        },
        Packed {
            bits: 2,
            data: &[
                0x0000005555528000,
            ],
        },
        Packed {
            bits: 2,
            data: &[
                0x555555E80A0F0000, 0x0000000000005555,
            ],
        },
    ],
};

pub(super) static LEV1T: Tables = Tables {
    min_errors: &[
        0, 1, 0, -1, -1, -1,
    ],
    to_states: &[
        Packed {
            bits: 2,
            data: &[
                0x0000000000000002,
            ],
        },
        Packed {
            bits: 2,
            data: &[
                0x0000000000AA9003,
            ],
        },
        Packed {
            bits: 3,
            data: &[
                0xB452691092100003, 0x000000000000004D,
            ],
        },
        Packed {
            bits: 3,
            data: &[
                0xA1024844900C0003, 0x536D1DAA4526914D, 0x000000000000D6B4,
            ],
        },
    ],
    offset_incrs: &[
        Packed {
            bits: 1,
            data: &[
                0x0000000000000000,
            ],
        },
        Packed {
            bits: 1,
            data: &[
                0x0000000000000FC0,
            ],
        },
        Packed {
            bits: 2,
            data: &[
                0x00005555552A0000,
            ],
        },
        Packed {
            bits: 2,
            data: &[
                0x5555EA02A0FC0000, 0x0000000055555555,
            ],
        },
    ],
};

pub(super) static LEV2: Tables = Tables {
    min_errors: &[
        0, 1, 0, -1, -1, 2, 1, 0, -1, -1, 0, -2, -2, -1, -2, -2, -1, -2, -1,
        0, -1, -1, -1, -2, -2, -2, -2, -2, -2, -2,
    ],
    to_states: &[
        Packed {
            bits: 5,
            data: &[
                0x7318060000741CC2, 0x0030000018063028, 0x0000000000000000,
            ],
        },
        Packed {
            bits: 5,
            data: &[
                0x731C060000741CE3, 0x003000001C073010, 0xCC63084210400000,
                0x18C2308E61228231, 0x00000318C631A863,
            ],
        },
        Packed {
            bits: 5,
            data: &[
                0x731C0600008420E3, 0x003000001C073010, 0x8C60252941000000,
                0x0008320C641CE831, 0x1084131800000C60, 0x239848A08C7318C2,
                0xC6318C6A18C6308C, 0x10239CE730C63104, 0x1A87318C2388E712,
                0x000000000039CC63,
            ],
        },
        Packed {
            bits: 5,
            data: &[
                0x731C0700008520E3, 0x003000001C073814, 0x8C00298A39400000,
                0x00C735C46608D730, 0x4A504000C0018C03, 0x8399473A0C731809,
                0xC60000031800020C, 0x8EA388E6025A9410, 0x18C6300C83A84760,
                0x318C258841318C00, 0x6308C241968A08C8, 0xCB104C6318C6A18C,
                0xD347268BA268632D, 0x1A8635286A1A82A2, 0x408E839CC318C413,
                0x6A1CC6308E241D68, 0x0730C83104E7318C, 0xA8242D287250B425,
                0x000039E8635287A1,
            ],
        },
        Packed {
            bits: 5,
            data: &[
                0x839C0700008520E3, 0x003800001C073814, 0x000049E838C00000,
                0x181D075067A44732, 0x628E530006018463, 0x7119823DCC23000A,
                0x0030006380C031CD, 0xC57388C003D8A394, 0x1C46398DD3784760,
                0x318094A504300C60, 0x0020C839948420C7, 0x09410C6000003980,
                0x9147A528A20C6042, 0x1806018543181234, 0x428E2398096A504A,
                0x6398C0320EA11D82, 0xE6041A9410C63000, 0x8D23BC4860D2A408,
                0x8841A18C601C5439, 0x4196AB08C8318C25, 0x6318C6B18C6308C2,
                0x02AA8C634E22104C, 0x715AD4D334D558B3, 0x18CB72C41A98D535,
                0xA0A8B4D1C9B2E89A, 0xB104C6A18D4B1A86, 0x367370BB2686345C,
                0xA9535B15B5693A45, 0x08E839CC318C41A9, 0xB1CC6308E241D6A5,
                0x7314A3104E7318C6, 0xD33CD578B182BA8E, 0xC41B9CD535717AD4,
                0xA1C952D0941CC320, 0xA18D4B1E86A090B4, 0xB5250731483104E7,
                0x17B56934452A7358, 0x00000000B9E9535B,
            ],
        },
        Packed {
            bits: 5,
            data: &[
                0x839C0700008520E3, 0x003800001C073814, 0xC000214838C00000,
                0x000731EE65290701, 0x7A0E3318C6319000, 0xD419E911CC800012,
                0xC001806118C60741, 0x44732000049E838C, 0x1C463181D375477A,
                0x3000A628E5398C73, 0x031CD7119823DCC2, 0x8A3940030006380C,
                0xD7462D17308C0029, 0x1A8635100300C7A5, 0x15CE23000F628E53,
                0x7118E6374DE11D83, 0xC003D8A394C03180, 0x8DDA796860C57388,
                0xA50439A873204639, 0x39948420C7318094, 0x60000039800020C8,
                0x4831CC602529410C, 0x90600008AA2F5529, 0x181082504AD4C631,
                0x048D2451E94A2883, 0x94128601806150C6, 0x567A528A20C60420,
                0x4C731C5431812AC9, 0x28E2398096A504B5, 0x398C0320EA11D824,
                0x6025A9410C630006, 0xC8BA97762D4A388E, 0x504AD68635106300,
                0x21834A902398106A, 0x31807150E6348EF1, 0xA408E6041A941286,
                0x54398D2BBD6A60D2, 0x8C258841B5687320, 0x08C24196AB08C831,
                0x104C6318C6B18C63, 0xA5BF22320C630962, 0x5AD6B26318C2D0A5,
                0xAAA318D388841D6B, 0x56B534CD35562CC0, 0x34E22106A6354D5C,
                0x3D4DFB8B302AA8C6, 0x41DEB5BD6F15AD4D, 0x1C9B2E89A18CB72C,
                0x18D4B1A86A0A8B4D, 0xA268632DCB104C6A, 0x6A1A82E2E1C7432B,
                0xD172C41D6B9AD732, 0xE914D9CDC2EC9A18, 0x06A6A54D6C56D5A4,
                0x7370BB2686345CB1, 0xBD6715B5693E4619, 0xE839CC318C41DEB9,
                0xCC6308E241D6A508, 0x0C63104E7318C6B1, 0xE8A5D5BDE23A0E73,
                0x1EF75AD6B27318C2, 0x2C60AEA39CC528C4, 0x4D5C5EB534CF355E,
                0xA8E7314A3106E735, 0xAD4D3ECDFE8B182B, 0x320C41F775BD6F17,
                0x0B4A1C952D0941CC, 0x4E7A18D4B1E86A09, 0x41EB4250730C8310,
                0xD7327A1A8292E127, 0x941CC520C41EF79A, 0xD5A4D114A9CD62D4,
                0x483106E7A54D6C5E, 0x460F7358B5250731, 0xF779BD6717B56939,
            ],
        },
    ],
    offset_incrs: &[
        Packed {
            bits: 2,
            data: &[
                0x0000C00082C20000,
            ],
        },
        Packed {
            bits: 2,
            data: &[
                0x5000C00082C20000, 0x0055555555555555,
            ],
        },
        Packed {
            bits: 2,
            data: &[
                0x0000C00082C20000, 0x55A00E008A28AA00, 0x5555555555555555,
                0x0000555555555555,
            ],
        },
        Packed {
            bits: 2,
            data: &[
                0x0000C00082C20000, 0x000C3CCCCF3CFC00, 0x000A00E008A28AA0,
                0x5555AC3ECC8E38BA, 0x5555555555555555, 0x5555555555555555,
                0x5555555555555555, 0x0000000055555555,
            ],
        },
        Packed {
            bits: 3,
            data: &[
                0x0000402602000000, 0xA088000000000060, 0x0008041249000140,
                0x36186186C361B600, 0x1B0E06D800000060, 0x48000081C0E47186,
                0x2000680010482412, 0x0041209049200001, 0x4134800004841229,
                0x0012603698610683, 0xE271841A0D04D200, 0x24924924924949C0,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x0000000024924924,
            ],
        },
        Packed {
            bits: 3,
            data: &[
                0x0000402602000000, 0x9808000000000060, 0x000B6DB58000A150,
                0x4924000502822000, 0x140A088000002010, 0x60000096CB24900A,
                0x06036186186C361B, 0x1861B0D86D800000, 0x81B600000B5DAD86,
                0x002070391C6186C3, 0xE471861B0E06D800, 0x48241248000095CA,
                0x2000012000680010, 0xADB5A00041209049, 0x0104824124800004,
                0x04920000121048A4, 0x004ACB2290041209, 0x6986106834134800,
                0xA0D04D2000012603, 0x8000049DADA61841, 0x70389C6106834134,
                0x841A0D04D2000012, 0x4924924949CAE271, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
            ],
        },
    ],
};

pub(super) static LEV2T: Tables = Tables {
    min_errors: &[
        0, 1, 0, -1, -1, 2, 1, 0, 0, -1, -1, 0, -1, -2, -2, -1, -2, -2, -2,
        -2, -1, -1, 0, -1, -1, -1, -1, -2, -2, -1, -1, -2, -2, -2, -2, -2, -2,
        -2, -2, -2, -2, -2,
    ],
    to_states: &[
        Packed {
            bits: 5,
            data: &[
                0x0300C00000749CC2, 0x00000C6000C049CC, 0x0000000001AE0300,
                0x0000000000000600,
            ],
        },
        Packed {
            bits: 5,
            data: &[
                0x0380C00000749CE3, 0x00000E7000C049CC, 0x0000000001D20300,
                0x98C6308421040600, 0x108C639849B98463, 0x6318C211AE6318C6,
                0x000000035CC6318C,
            ],
        },
        Packed {
            bits: 5,
            data: &[
                0x0380C0000094A4E3, 0x00000E7000C049CC, 0x0000000001D20300,
                0x18C60294A4100600, 0x420C631947399063, 0x600008400C630000,
                0xC21884131CC6018C, 0x8E6126E6118E6398, 0x0846B9CC63184231,
                0x104E939CC6318C63, 0x949C4739CE730C63, 0xE7398C6108E739C6,
                0x4E731CE7318C211A, 0x000000000000003A,
            ],
        },
        Packed {
            bits: 6,
            data: &[
                0x01C00000093491C3, 0xC70001C03471801C, 0x0073401800000001,
                0x5006000000000000, 0x8608618000B38B1C, 0x6871860863821866,
                0x001A386186006006, 0x0418618618600018, 0x2071C618600A28A2,
                0x02081C61C62871C6, 0x0001B6C018618000, 0x2041871860061860,
                0x76C70871C600A3CA, 0x066C81C70873C21C, 0x18001BA461871860,
                0x20811C71C7187186, 0xC60862461C61820C, 0x1860821862463095,
                0x61861823065C7186, 0x0C0811C91C718618, 0x5D731729724618C4,
                0x71973025D729778A, 0x865C618C7975C919, 0x0C30812492495D71,
                0x92470892471C7183, 0xC61860822472470C, 0x1C718618C3065C71,
                0x34030811C91C7187, 0x0A24930928924718, 0x1D71973022492894,
                0x91C75C618C7975C9, 0x000000002492495C,
            ],
        },
        Packed {
            bits: 6,
            data: &[
                0x01C00000093491C3, 0xC70001C03491C01C, 0x0073401C00000001,
                0x3007000000000000, 0xC62000000134491C, 0x8E318020644A0861,
                0x6023446086186180, 0xC518218000618018, 0x68608618000B38B1,
                0x66871860873821C6, 0x8001A3871C600600, 0x1C51C71861860001,
                0x768708618001438B, 0x869231C608738308, 0x1C60243870871871,
                0xA2041C21C6187180, 0x462071C618600A28, 0x0002081C61C62892,
                0x600001B6C01C6180, 0x8A20418918600618, 0x2972092061860124,
                0x61809E724621748A, 0xC6186028A860975C, 0x3CA2045CA5C60175,
                0x22476C70871C600A, 0x860066C81C70893C, 0x18618001BA471C71,
                0x23CA2042491C7187, 0xC32896C90871C601, 0x5C7186A272470893,
                0x95C61C6028A47089, 0x820C208124A24718, 0x30D6460862461C61,
                0x7186186082186246, 0x8618618618230664, 0x1951420811CD1C71,
                0x87CE7180982C61C6, 0x1A6186065556062D, 0x1986066181957D87,
                0x618C40C08168E687, 0x9978A65731729724, 0x6491971973025D72,
                0x95D71865C618C799, 0x4619640C08134D24, 0x29978F7193192972,
                0x970D619617595657, 0x495D960665819679, 0x1C71830C308134E3,
                0x72470CD347089247, 0x066471C618608224, 0x1C71871C718618C3,
                0x71C71851430811CD, 0x472DA14E39A08D2C, 0x7D871A6986065553,
                0xE68719A687618196, 0x8924718340308168, 0x24928D40A3493092,
                0xC7996491D7197302, 0x4D2495C91C75C618, 0x2892471854030813,
                0x534928D40F38D30D, 0x9679970D69961759, 0x34E3495CD6876581,
            ],
        },
        Packed {
            bits: 6,
            data: &[
                0x01C00000093491C3, 0xC70001C03491C01C, 0x0073401C00000001,
                0x3007000000000000, 0xC01C00000093491C, 0x1C718668634B2001,
                0x6187346200000000, 0xC318818618618618, 0x1C62000000134491,
                0x08E318020644A086, 0x8602344608618618, 0x1C31821800061801,
                0x61C6200000013449, 0x808E31C66C744A08, 0x1C71A34470861861,
                0xB1C51C21C61871C6, 0xC668608618000B38, 0x0066871860873821,
                0x018001A3871C6006, 0x8B1C51C718618600, 0x20668608618000B3,
                0x60066875D730938C, 0x865C619A38920600, 0x38B1C52485D75D71,
                0x3087687086180014, 0x871869231C608738, 0x1801C60243870871,
                0x438B1C51C21C6187, 0x8308768708618001, 0x1871869232573093,
                0x91C62471A4389087, 0x0A28A2042422575C, 0x2892462071C61860,
                0x61800002081C61C6, 0x0618600001B6C01C, 0x00A28A2041891860,
                0x828B2C62071C6186, 0x0618000020869869, 0x19861818619B6C62,
                0x601248A20460B618, 0x1748A29720920618, 0x0975C61809E72462,
                0x60175C6186028A86, 0x8601248A2045CA5C, 0x6D948A2972092061,
                0x70975C61809E7358, 0x581996581C71A8A8, 0x1C600A3CA20464A6,
                0x70893C22476C7087, 0x471C71860066C81C, 0x1C718718618001BA,
                0x71C600A3CA204249, 0x9A30D3CC2C76C708, 0xA492071860066C86,
                0xB69A5DA6185C619B, 0x871C60123CA20434, 0x2470893C32896C90,
                0x8A470895C7186A27, 0x4A2471895C61C602, 0x0871C60123CA2042,
                0x735A30D3C32896C9, 0xA8A490895C7186A2, 0x34A35A5CD6582471,
                0x62461C61820C2081, 0x8218624630D64608, 0x1823066471861860,
                0x11CD1C7186186186, 0x862461C61820C208, 0x0828204E03117460,
                0x0802320747186186, 0x818D18E382082082, 0x0982C61C61951420,
                0x65556062D87CE718, 0x181957D871A61860, 0x08168E6871986066,
                0x80982C61C6195142, 0x065558605217CE71, 0x8618157E171A6186,
                0xC08190E923821860, 0x5731729724618C40, 0x1973025D729978A6,
                0x65C618C799649197, 0x0C08134D2495D718, 0x75731729724618C4,
                0x71973029A64A2792, 0x209A080C7A274919, 0x40C0819514D39A68,
                0xF719319297246196, 0x1961759565729978, 0x60665819679970D6,
                0x640C08134E3495D9, 0x8F71931929724619, 0x6196175958A64A27,
                0x28608A18167A270D, 0x830C308194E9539A, 0x0CD3470892471C71,
                0x71C6186082247247, 0x871C718618C30664, 0x1830C30811CD1C71,
                0x30D14470892471C7, 0x471C61860824E34E, 0x8238E382080C3207,
                0x71851430818D18E3, 0xDA14E39A08D2C71C, 0x71A6986065553472,
                0x719A6876181967D8, 0xC718514308168E68, 0x52414E39A08D2C71,
                0x171A698606555963, 0x238249238618167E, 0x24718340308190E9,
                0x928D40A349309289, 0x996491D719730224, 0x2495C91C75C618C7,
                0x924718340308134D, 0xD34A541244930928, 0x7A27491D71973024,
                0x14D39938E39A080C, 0x8924718540308195, 0x34928D40F38D30D2,
                0x679970D699617595, 0x4E3495CD68765819, 0x2892471854030813,
                0x59534A540F38D30D, 0x167A270D69961759, 0x94E9539A59238A18,
            ],
        },
    ],
    offset_incrs: &[
        Packed {
            bits: 2,
            data: &[
                0x00C000082C080000, 0x0000000000030000,
            ],
        },
        Packed {
            bits: 2,
            data: &[
                0x00C000082C080000, 0x5555555555530000, 0x0000005555555555,
            ],
        },
        Packed {
            bits: 2,
            data: &[
                0x00C000082C080000, 0x0AA2A2AA00030000, 0x555555AA2A000E80,
                0x5555555555555555, 0x5555555555555555, 0x0000000000005555,
            ],
        },
        Packed {
            bits: 2,
            data: &[
                0x00C000082C080000, 0x0FF3F3FC00030000, 0x2AA000FFF0C03F33,
                0x0AA2A000E800AA2A, 0xC03EB30AE3A2EA00, 0x555555555555AAEA,
                0x5555555555555555, 0x5555555555555555, 0x5555555555555555,
                0x5555555555555555, 0x0000000055555555,
            ],
        },
        Packed {
            bits: 3,
            data: &[
                0x0010098010000000, 0x0300000000060000, 0x0205029044000000,
                0x0920120900124920, 0xC06DB0DB0DB60000, 0x01B6DB0180036C30,
                0x301B6C38C36D8000, 0x0071B6E07000E38E, 0x0004920920924800,
                0x0012482480000690, 0x2001248248249200, 0x0004920929001225,
                0x30C049A0D209A480, 0x0001249A49800369, 0x4E30126834826920,
                0x92494926927000E2, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x0000000024924924,
            ],
        },
        Packed {
            bits: 3,
            data: &[
                0x0010098010000000, 0x0300000000060000, 0x02D5426004000000,
                0x0AEDB6DB68158000, 0x008140A411000000, 0x0248048240049248,
                0x0025502904400000, 0x00925B2592812492, 0x0C06DB0DB0DB6000,
                0x001B6DB0180036C3, 0xC301B6C36C36D800, 0x0006DB6ED7680DB0,
                0x38C06DB0E30DB600, 0x0001C6DB81C0038E, 0x8E301B6C38C36D80,
                0x000071B6E57280E3, 0x9000049209209248, 0x0000124824800006,
                0xA400012482482492, 0x80000492A92B6815, 0x8948004920920924,
                0x20000124824A4004, 0x2252001248248249, 0x480000492A929281,
                0x36930C049A0D209A, 0x9200001249A49800, 0x0DA4C30126834826,
                0xA480000492692768, 0x038938C049A0D209, 0x69200001249A49C0,
                0x80E24E3012683482, 0x4924924949269272, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
                0x9249249249249249, 0x4924924924924924, 0x2492492492492492,
            ],
        },
    ],
};
