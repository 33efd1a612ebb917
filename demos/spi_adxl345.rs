// SPI1 で ADXL345 (3 軸加速度センサ) を読み、g 単位で USART3 に出す
//   PA5 = SCK, PA6 = MISO, PA7 = MOSI (AF5), PA9 = CS (ソフトウェア制御)
//   マスタ, fPCLK / 4, CPOL = 1, CPHA = 1, 8bit, MSB ファースト

#![no_std]
#![no_main]

use panic_halt as _;

use core::fmt::Write;

use cortex_m_rt::entry;

use stm32f4::stm32f429;

use stm32f429zi_rust_example::adxl345::{self, Sample};
use stm32f429zi_rust_example::uart;

fn config_spi(peripheral: &stm32f429::Peripherals) {
    peripheral.RCC.ahb1enr.modify(|_, w| w.gpioaen().enabled());

    // PA5 ~ PA7 は SPI1 (AF5)
    peripheral.GPIOA.moder.modify(|_, w| {
        w.moder5()
            .alternate()
            .moder6()
            .alternate()
            .moder7()
            .alternate()
    });
    peripheral
        .GPIOA
        .afrl
        .modify(|_, w| w.afrl5().af5().afrl6().af5().afrl7().af5());

    // PA9 はチップセレクト (Low で選択)
    peripheral.GPIOA.odr.modify(|_, w| w.odr9().set_bit());
    peripheral.GPIOA.moder.modify(|_, w| w.moder9().output());

    peripheral.RCC.apb2enr.modify(|_, w| w.spi1en().enabled());

    // 16 MHz / 4 = 4 MHz (ADXL345 は 5 MHz まで)
    // NSS はソフトウェア管理にして SSI = 1 (マスタのまま MODF を出さない)
    peripheral.SPI1.cr1.write(|w| {
        w.br()
            .div4()
            .cpol()
            .set_bit()
            .cpha()
            .set_bit()
            .rxonly()
            .clear_bit()
            .lsbfirst()
            .clear_bit()
            .dff()
            .clear_bit()
            .ssm()
            .set_bit()
            .ssi()
            .set_bit()
            .mstr()
            .set_bit()
    });
    peripheral.SPI1.cr1.modify(|_, w| w.spe().set_bit());
}

/// data を順に送る。送り終わったら受信側のオーバーランをクリアしておく
fn transmit(spi: &stm32f429::SPI1, data: &[u8]) {
    for byte in data {
        while spi.sr.read().txe().bit_is_clear() {}
        spi.dr.write(|w| unsafe { w.bits(u32::from(*byte)) });
    }

    while spi.sr.read().txe().bit_is_clear() {}
    while spi.sr.read().bsy().bit_is_set() {}

    // OVR は DR -> SR の順に読むと落ちる
    let _ = spi.dr.read();
    let _ = spi.sr.read();
}

/// ダミーの 0 を送って buf.len() byte 受け取る
fn receive(spi: &stm32f429::SPI1, buf: &mut [u8]) {
    for byte in buf.iter_mut() {
        spi.dr.write(|w| unsafe { w.bits(0) });
        while spi.sr.read().rxne().bit_is_clear() {}
        *byte = spi.dr.read().bits() as u8;
    }
}

fn cs_enable(gpioa: &stm32f429::GPIOA) {
    gpioa.odr.modify(|_, w| w.odr9().clear_bit());
}

fn cs_disable(gpioa: &stm32f429::GPIOA) {
    gpioa.odr.modify(|_, w| w.odr9().set_bit());
}

fn adxl_write(peripheral: &stm32f429::Peripherals, reg: u8, value: u8) {
    cs_enable(&peripheral.GPIOA);
    transmit(&peripheral.SPI1, &[adxl345::spi_write_command(reg), value]);
    cs_disable(&peripheral.GPIOA);
}

fn adxl_read(peripheral: &stm32f429::Peripherals, reg: u8, buf: &mut [u8; 6]) {
    cs_enable(&peripheral.GPIOA);
    transmit(&peripheral.SPI1, &[adxl345::spi_read_command(reg)]);
    receive(&peripheral.SPI1, buf);
    cs_disable(&peripheral.GPIOA);
}

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();

    config_spi(&peripheral);
    uart::init_tx(&peripheral);
    let mut console = uart::Console::new(&peripheral.USART3);

    for (reg, value) in adxl345::INIT_SEQUENCE {
        adxl_write(&peripheral, reg, value);
    }

    let mut raw = [0_u8; 6];
    loop {
        adxl_read(&peripheral, adxl345::DATA_START, &mut raw);
        let (xg, yg, zg) = Sample::from_bytes(&raw).to_g();
        writeln!(console, "x: {:.3} g, y: {:.3} g, z: {:.3} g", xg, yg, zg).unwrap();
    }
}
